//! PostgreSQL implementation of UserDirectory.
//!
//! Persists User profiles to PostgreSQL. The ratings list lives in a
//! JSONB column; appends go through the JSONB concatenation operator
//! guarded by a provenance check, so concurrent profile writes never
//! clobber a rating and replays are absorbed in the database.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Identity, Timestamp};
use crate::domain::user::{RatingEntry, StoredRatingEntry, User, UserRole};
use crate::ports::UserDirectory;

/// PostgreSQL implementation of UserDirectory.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new PostgresUserDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn not_found(identity: &Identity) -> DomainError {
        DomainError::new(
            ErrorCode::UserNotFound,
            format!("User not found: {}", identity),
        )
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let ratings = encode_ratings(user.ratings())?;

        sqlx::query(
            r#"
            INSERT INTO users (
                identity, username, full_name, email, location, availability,
                skills_offered, skills_wanted, is_public, is_banned, ban_reason,
                is_verified, role, rating, ratings, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.identity().as_str())
        .bind(user.username())
        .bind(user.full_name())
        .bind(user.email())
        .bind(user.location())
        .bind(user.availability())
        .bind(user.skills_offered())
        .bind(user.skills_wanted())
        .bind(user.is_public())
        .bind(user.is_banned())
        .bind(user.ban_reason())
        .bind(user.is_verified())
        .bind(user.role().as_str())
        .bind(user.rating())
        .bind(ratings)
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                duplicate_user_error(db.constraint())
            }
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert user: {}", e),
            ),
        })?;

        Ok(())
    }

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT identity, username, full_name, email, location, availability,
                   skills_offered, skills_wanted, is_public, is_banned, ban_reason,
                   is_verified, role, rating, ratings, created_at, updated_at
            FROM users
            WHERE identity = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let user = row_to_user(row)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        // Profile fields only. Flags, role, and ratings have their own
        // targeted writes and are never touched here.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                full_name = $3,
                email = $4,
                location = $5,
                availability = $6,
                skills_offered = $7,
                skills_wanted = $8,
                is_public = $9,
                updated_at = $10
            WHERE identity = $1
            "#,
        )
        .bind(user.identity().as_str())
        .bind(user.username())
        .bind(user.full_name())
        .bind(user.email())
        .bind(user.location())
        .bind(user.availability())
        .bind(user.skills_offered())
        .bind(user.skills_wanted())
        .bind(user.is_public())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                duplicate_user_error(db.constraint())
            }
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update user: {}", e),
            ),
        })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(user.identity()));
        }

        Ok(())
    }

    async fn delete(&self, identity: &Identity) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE identity = $1")
            .bind(identity.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete user: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(identity));
        }

        Ok(())
    }

    async fn list_visible(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT identity, username, full_name, email, location, availability,
                   skills_offered, skills_wanted, is_public, is_banned, ban_reason,
                   is_verified, role, rating, ratings, created_at, updated_at
            FROM users
            WHERE is_public AND NOT is_banned
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list visible users: {}", e),
            )
        })?;

        let users: Result<Vec<User>, DomainError> = rows.into_iter().map(row_to_user).collect();

        users
    }

    async fn list_members(&self, offset: u32, limit: u32) -> Result<Vec<User>, DomainError> {
        // Older rows carry a capitalised role value.
        let rows = sqlx::query(
            r#"
            SELECT identity, username, full_name, email, location, availability,
                   skills_offered, skills_wanted, is_public, is_banned, ban_reason,
                   is_verified, role, rating, ratings, created_at, updated_at
            FROM users
            WHERE role NOT IN ('admin', 'Admin')
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list members: {}", e),
            )
        })?;

        let users: Result<Vec<User>, DomainError> = rows.into_iter().map(row_to_user).collect();

        users
    }

    async fn append_rating(
        &self,
        identity: &Identity,
        entry: &RatingEntry,
    ) -> Result<(), DomainError> {
        let stored = serde_json::to_value(entry.to_stored()).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to encode rating entry: {}", e),
            )
        })?;

        let result = sqlx::query(
            r#"
            UPDATE users SET ratings = ratings || $2::jsonb, updated_at = $3
            WHERE identity = $1
              AND NOT EXISTS (
                  SELECT 1 FROM jsonb_array_elements(ratings) AS e
                  WHERE e->>'swap_id' = $4 AND e->>'from' = $5
              )
            "#,
        )
        .bind(identity.as_str())
        .bind(stored)
        .bind(Timestamp::now().as_datetime())
        .bind(entry.swap_id.to_string())
        .bind(entry.from.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append rating: {}", e),
            )
        })?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // No row changed: either the user is gone or the same provenance
        // already landed. A replay is absorbed silently.
        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE identity = $1")
            .bind(identity.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check user existence: {}", e),
                )
            })?;

        if exists.0 == 0 {
            return Err(Self::not_found(identity));
        }

        Ok(())
    }

    async fn rating_entries(
        &self,
        identity: &Identity,
    ) -> Result<Vec<StoredRatingEntry>, DomainError> {
        let row = sqlx::query("SELECT ratings FROM users WHERE identity = $1")
            .bind(identity.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch ratings: {}", e),
                )
            })?;

        let Some(row) = row else {
            return Err(Self::not_found(identity));
        };

        let ratings: serde_json::Value = row.try_get("ratings").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get ratings: {}", e),
            )
        })?;

        decode_ratings(ratings)
    }

    async fn set_scalar_rating(
        &self,
        identity: &Identity,
        rating: Option<f64>,
    ) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET rating = $2, updated_at = $3 WHERE identity = $1")
                .bind(identity.as_str())
                .bind(rating)
                .bind(Timestamp::now().as_datetime())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to set scalar rating: {}", e),
                    )
                })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(identity));
        }

        Ok(())
    }

    async fn set_banned(
        &self,
        identity: &Identity,
        banned: bool,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        // Clearing the ban also drops the stored reason.
        let reason = if banned { reason } else { None };

        let result = sqlx::query(
            r#"
            UPDATE users SET is_banned = $2, ban_reason = $3, updated_at = $4
            WHERE identity = $1
            "#,
        )
        .bind(identity.as_str())
        .bind(banned)
        .bind(reason)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to set ban flag: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(identity));
        }

        Ok(())
    }

    async fn set_verified(&self, identity: &Identity, verified: bool) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET is_verified = $2, updated_at = $3 WHERE identity = $1")
                .bind(identity.as_str())
                .bind(verified)
                .bind(Timestamp::now().as_datetime())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to set verification flag: {}", e),
                    )
                })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(identity));
        }

        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count users: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }

    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count recent users: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn duplicate_user_error(constraint: Option<&str>) -> DomainError {
    let field = match constraint {
        Some("users_email_key") => "email",
        _ => "identity",
    };
    DomainError::new(
        ErrorCode::DuplicateUser,
        format!("A user with this {} already exists", field),
    )
    .with_detail("field", field)
}

fn encode_ratings(entries: &[StoredRatingEntry]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(entries).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to encode ratings: {}", e),
        )
    })
}

fn decode_ratings(value: serde_json::Value) -> Result<Vec<StoredRatingEntry>, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode ratings: {}", e),
        )
    })
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let identity: String = row.try_get("identity").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get identity: {}", e),
        )
    })?;

    let username: String = row.try_get("username").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get username: {}", e),
        )
    })?;

    let full_name: String = row.try_get("full_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get full_name: {}", e),
        )
    })?;

    let email: String = row.try_get("email").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get email: {}", e),
        )
    })?;

    let location: Option<String> = row.try_get("location").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get location: {}", e),
        )
    })?;

    let availability: Option<String> = row.try_get("availability").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get availability: {}", e),
        )
    })?;

    let skills_offered: Vec<String> = row.try_get("skills_offered").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get skills_offered: {}", e),
        )
    })?;

    let skills_wanted: Vec<String> = row.try_get("skills_wanted").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get skills_wanted: {}", e),
        )
    })?;

    let is_public: bool = row.try_get("is_public").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get is_public: {}", e),
        )
    })?;

    let is_banned: bool = row.try_get("is_banned").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get is_banned: {}", e),
        )
    })?;

    let ban_reason: Option<String> = row.try_get("ban_reason").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get ban_reason: {}", e),
        )
    })?;

    let is_verified: bool = row.try_get("is_verified").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get is_verified: {}", e),
        )
    })?;

    let role: String = row.try_get("role").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get role: {}", e),
        )
    })?;

    let rating: Option<f64> = row.try_get("rating").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get rating: {}", e),
        )
    })?;

    let ratings_json: serde_json::Value = row.try_get("ratings").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get ratings: {}", e),
        )
    })?;
    let ratings = decode_ratings(ratings_json)?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;

    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get updated_at: {}", e),
        )
    })?;

    Ok(User::reconstitute(
        Identity::new(identity).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid identity: {}", e),
            )
        })?,
        username,
        full_name,
        email,
        location,
        availability,
        skills_offered,
        skills_wanted,
        is_public,
        is_banned,
        ban_reason,
        is_verified,
        UserRole::parse_str(&role),
        rating,
        ratings,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
