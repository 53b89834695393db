//! PostgreSQL implementation of AdminLogStore.
//!
//! Appends moderation audit entries. The table is append-only; no
//! update or delete path exists.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::admin::{AdminAction, AdminLogEntry};
use crate::domain::foundation::{DomainError, ErrorCode, Identity, LogEntryId, Timestamp};
use crate::ports::AdminLogStore;

/// PostgreSQL implementation of AdminLogStore.
#[derive(Clone)]
pub struct PostgresAdminLogStore {
    pool: PgPool,
}

impl PostgresAdminLogStore {
    /// Creates a new PostgresAdminLogStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminLogStore for PostgresAdminLogStore {
    async fn append(&self, entry: &AdminLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO admin_logs (id, admin_id, action, target_id, reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.admin().as_str())
        .bind(entry.action().as_str())
        .bind(entry.target_id())
        .bind(entry.reason())
        .bind(entry.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append audit entry: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<AdminLogEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, admin_id, action, target_id, reason, created_at
            FROM admin_logs
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
                format!("Failed to list audit entries: {}", e),
            )
        })?;

        let entries: Result<Vec<AdminLogEntry>, DomainError> =
            rows.into_iter().map(row_to_entry).collect();

        entries
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_admin_action(s: &str) -> Result<AdminAction, DomainError> {
    AdminAction::parse_str(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid admin action: {}", s),
        )
    })
}

fn row_to_entry(row: sqlx::postgres::PgRow) -> Result<AdminLogEntry, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let admin_id: String = row.try_get("admin_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get admin_id: {}", e),
        )
    })?;

    let action_str: String = row.try_get("action").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get action: {}", e),
        )
    })?;
    let action = str_to_admin_action(&action_str)?;

    let target_id: String = row.try_get("target_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get target_id: {}", e),
        )
    })?;

    let reason: Option<String> = row.try_get("reason").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get reason: {}", e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;

    Ok(AdminLogEntry::reconstitute(
        LogEntryId::from_uuid(id),
        Identity::new(admin_id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid admin_id: {}", e),
            )
        })?,
        action,
        target_id,
        reason,
        Timestamp::from_datetime(created_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_action_conversion_roundtrips() {
        for action in [
            AdminAction::VerifyUser,
            AdminAction::SuspendUser,
            AdminAction::BanUser,
            AdminAction::DeleteUser,
            AdminAction::ApproveSwap,
            AdminAction::RejectSwap,
            AdminAction::DeleteSwap,
        ] {
            assert_eq!(str_to_admin_action(action.as_str()).unwrap(), action);
        }
    }

    #[test]
    fn str_to_admin_action_rejects_invalid() {
        assert!(str_to_admin_action("promote_user").is_err());
    }
}
