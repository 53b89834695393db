//! PostgreSQL implementation of BroadcastStore.
//!
//! Stores platform announcements for a later delivery pipeline. This
//! service only writes; nothing here reads broadcasts back.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::admin::Broadcast;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::BroadcastStore;

/// PostgreSQL implementation of BroadcastStore.
#[derive(Clone)]
pub struct PostgresBroadcastStore {
    pool: PgPool,
}

impl PostgresBroadcastStore {
    /// Creates a new PostgresBroadcastStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BroadcastStore for PostgresBroadcastStore {
    async fn append(&self, broadcast: &Broadcast) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO broadcasts (id, title, message, sent_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(broadcast.id().as_uuid())
        .bind(broadcast.title())
        .bind(broadcast.message())
        .bind(broadcast.sent_by().as_str())
        .bind(broadcast.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append broadcast: {}", e),
            )
        })?;

        Ok(())
    }
}
