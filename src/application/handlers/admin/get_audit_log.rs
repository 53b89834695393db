//! GetAuditLogHandler - Admin query for the moderation audit trail.

use std::sync::Arc;

use crate::domain::admin::{AdminError, AdminLogEntry};
use crate::domain::foundation::Identity;
use crate::ports::{AdminLogStore, UserDirectory};

use super::guard::ensure_admin;

const DEFAULT_LIMIT: u32 = 100;

/// Query to page through the audit log, newest first.
#[derive(Debug, Clone)]
pub struct GetAuditLogQuery {
    pub caller: Identity,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for reading the audit log.
pub struct GetAuditLogHandler {
    directory: Arc<dyn UserDirectory>,
    audit_log: Arc<dyn AdminLogStore>,
}

impl GetAuditLogHandler {
    pub fn new(directory: Arc<dyn UserDirectory>, audit_log: Arc<dyn AdminLogStore>) -> Self {
        Self {
            directory,
            audit_log,
        }
    }

    pub async fn handle(&self, query: GetAuditLogQuery) -> Result<Vec<AdminLogEntry>, AdminError> {
        ensure_admin(self.directory.as_ref(), &query.caller).await?;

        let entries = self
            .audit_log
            .list(
                query.skip.unwrap_or(0),
                query.limit.unwrap_or(DEFAULT_LIMIT),
            )
            .await
            .map_err(AdminError::from)?;
        Ok(entries)
    }
}
