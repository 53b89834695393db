//! PostgreSQL implementation of SwapStore.
//!
//! Persists Swap aggregates to PostgreSQL. Status transitions and
//! feedback claims are single conditional UPDATEs keyed on the expected
//! current state; the row count tells the caller whether it won.
//!
//! Legacy rows may hold a participant as the internal user row key, so
//! every load joins `users.pk::text` and falls back to the raw column
//! value when the join misses.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Identity, Score, SwapId, Timestamp};
use crate::domain::swap::{ParticipantRole, Swap, SwapStatus};
use crate::ports::SwapStore;

/// PostgreSQL implementation of SwapStore.
#[derive(Clone)]
pub struct PostgresSwapStore {
    pool: PgPool,
}

impl PostgresSwapStore {
    /// Creates a new PostgresSwapStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwapStore for PostgresSwapStore {
    async fn insert(&self, swap: &Swap) -> Result<(), DomainError> {
        let (requester_feedback, requester_rating) = swap.feedback(ParticipantRole::Requester);
        let (receiver_feedback, receiver_rating) = swap.feedback(ParticipantRole::Receiver);

        sqlx::query(
            r#"
            INSERT INTO swaps (
                id, requester_id, receiver_id, message, status,
                requester_feedback, requester_rating,
                receiver_feedback, receiver_rating,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(swap.id().as_uuid())
        .bind(swap.requester().as_str())
        .bind(swap.receiver().as_str())
        .bind(swap.message())
        .bind(swap.status().as_str())
        .bind(requester_feedback)
        .bind(requester_rating.map(|s| s.as_i16()))
        .bind(receiver_feedback)
        .bind(receiver_rating.map(|s| s.as_i16()))
        .bind(swap.created_at().as_datetime())
        .bind(swap.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // The partial unique index on pending (requester, receiver)
            // pairs is the race-proof duplicate guard.
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::DuplicateSwapRequest,
                "A pending swap request between these users already exists",
            ),
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert swap: {}", e),
            ),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SwapId) -> Result<Option<Swap>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT s.id,
                   COALESCE(ur.identity, s.requester_id) AS requester_id,
                   COALESCE(uv.identity, s.receiver_id) AS receiver_id,
                   s.message, s.status,
                   s.requester_feedback, s.requester_rating,
                   s.receiver_feedback, s.receiver_rating,
                   s.created_at, s.updated_at
            FROM swaps s
            LEFT JOIN users ur ON s.requester_id = ur.pk::text
            LEFT JOIN users uv ON s.receiver_id = uv.pk::text
            WHERE s.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch swap: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let swap = row_to_swap(row)?;
                Ok(Some(swap))
            }
            None => Ok(None),
        }
    }

    async fn pending_exists(
        &self,
        requester: &Identity,
        receiver: &Identity,
    ) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM swaps
            WHERE requester_id = $1 AND receiver_id = $2 AND status = 'pending'
            "#,
        )
        .bind(requester.as_str())
        .bind(receiver.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check for pending swap: {}", e),
            )
        })?;

        Ok(result.0 > 0)
    }

    async fn transition(
        &self,
        id: &SwapId,
        expected: SwapStatus,
        target: SwapStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE swaps SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(target.as_str())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to transition swap: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn claim_feedback(
        &self,
        id: &SwapId,
        role: ParticipantRole,
        feedback: &str,
        score: Score,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let sql = match role {
            ParticipantRole::Requester => {
                r#"
                UPDATE swaps SET
                    requester_feedback = $2,
                    requester_rating = $3,
                    updated_at = $4
                WHERE id = $1 AND status = 'accepted'
                  AND requester_feedback IS NULL AND requester_rating IS NULL
                "#
            }
            ParticipantRole::Receiver => {
                r#"
                UPDATE swaps SET
                    receiver_feedback = $2,
                    receiver_rating = $3,
                    updated_at = $4
                WHERE id = $1 AND status = 'accepted'
                  AND receiver_feedback IS NULL AND receiver_rating IS NULL
                "#
            }
        };

        let result = sqlx::query(sql)
            .bind(id.as_uuid())
            .bind(feedback)
            .bind(score.as_i16())
            .bind(at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to claim feedback slot: {}", e),
                )
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_participant(&self, identity: &Identity) -> Result<Vec<Swap>, DomainError> {
        // Matches against both the canonical identity and the resolved
        // legacy form, so old rows still show up in the owner's history.
        let rows = sqlx::query(
            r#"
            SELECT s.id,
                   COALESCE(ur.identity, s.requester_id) AS requester_id,
                   COALESCE(uv.identity, s.receiver_id) AS receiver_id,
                   s.message, s.status,
                   s.requester_feedback, s.requester_rating,
                   s.receiver_feedback, s.receiver_rating,
                   s.created_at, s.updated_at
            FROM swaps s
            LEFT JOIN users ur ON s.requester_id = ur.pk::text
            LEFT JOIN users uv ON s.receiver_id = uv.pk::text
            WHERE COALESCE(ur.identity, s.requester_id) = $1
               OR COALESCE(uv.identity, s.receiver_id) = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(identity.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch swaps for participant: {}", e),
            )
        })?;

        let swaps: Result<Vec<Swap>, DomainError> = rows.into_iter().map(row_to_swap).collect();

        swaps
    }

    async fn list_all(&self, offset: u32, limit: u32) -> Result<Vec<Swap>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id,
                   COALESCE(ur.identity, s.requester_id) AS requester_id,
                   COALESCE(uv.identity, s.receiver_id) AS receiver_id,
                   s.message, s.status,
                   s.requester_feedback, s.requester_rating,
                   s.receiver_feedback, s.receiver_rating,
                   s.created_at, s.updated_at
            FROM swaps s
            LEFT JOIN users ur ON s.requester_id = ur.pk::text
            LEFT JOIN users uv ON s.receiver_id = uv.pk::text
            ORDER BY s.created_at DESC
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
                format!("Failed to list swaps: {}", e),
            )
        })?;

        let swaps: Result<Vec<Swap>, DomainError> = rows.into_iter().map(row_to_swap).collect();

        swaps
    }

    async fn delete(&self, id: &SwapId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM swaps WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete swap: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SwapNotFound,
                format!("Swap not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM swaps")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count swaps: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }

    async fn count_by_status(&self, status: SwapStatus) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM swaps WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count swaps by status: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }

    async fn count_created_since(&self, since: &Timestamp) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM swaps WHERE created_at >= $1")
            .bind(since.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count recent swaps: {}", e),
                )
            })?;

        Ok(result.0 as u64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_swap_status(s: &str) -> Result<SwapStatus, DomainError> {
    SwapStatus::parse_str(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid swap status: {}", s),
        )
    })
}

fn score_from_stored(value: Option<i16>) -> Result<Option<Score>, DomainError> {
    match value {
        Some(value) => {
            let score = Score::try_from_i16(value).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid stored rating: {}", e),
                )
            })?;
            Ok(Some(score))
        }
        None => Ok(None),
    }
}

fn row_to_swap(row: sqlx::postgres::PgRow) -> Result<Swap, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let requester_id: String = row.try_get("requester_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get requester_id: {}", e),
        )
    })?;

    let receiver_id: String = row.try_get("receiver_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get receiver_id: {}", e),
        )
    })?;

    let message: Option<String> = row.try_get("message").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get message: {}", e),
        )
    })?;

    let status_str: String = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;
    let status = str_to_swap_status(&status_str)?;

    let requester_feedback: Option<String> = row.try_get("requester_feedback").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get requester_feedback: {}", e),
        )
    })?;

    let requester_rating: Option<i16> = row.try_get("requester_rating").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get requester_rating: {}", e),
        )
    })?;

    let receiver_feedback: Option<String> = row.try_get("receiver_feedback").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get receiver_feedback: {}", e),
        )
    })?;

    let receiver_rating: Option<i16> = row.try_get("receiver_rating").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get receiver_rating: {}", e),
        )
    })?;

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

    Ok(Swap::reconstitute(
        SwapId::from_uuid(id),
        Identity::new(requester_id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid requester_id: {}", e),
            )
        })?,
        Identity::new(receiver_id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid receiver_id: {}", e),
            )
        })?,
        message,
        status,
        requester_feedback,
        score_from_stored(requester_rating)?,
        receiver_feedback,
        score_from_stored(receiver_rating)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_status_conversion_roundtrips() {
        for status in [
            SwapStatus::Pending,
            SwapStatus::Accepted,
            SwapStatus::Rejected,
            SwapStatus::Cancelled,
            SwapStatus::Completed,
        ] {
            assert_eq!(str_to_swap_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn str_to_swap_status_rejects_invalid() {
        assert!(str_to_swap_status("archived").is_err());
    }

    #[test]
    fn stored_score_conversion_handles_empty_slot() {
        assert_eq!(score_from_stored(None).unwrap(), None);
        assert_eq!(
            score_from_stored(Some(4)).unwrap(),
            Some(Score::try_from_i16(4).unwrap())
        );
    }

    #[test]
    fn stored_score_conversion_rejects_out_of_range() {
        assert!(score_from_stored(Some(0)).is_err());
        assert!(score_from_stored(Some(9)).is_err());
    }
}
