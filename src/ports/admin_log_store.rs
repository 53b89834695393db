//! Admin audit log store port.

use async_trait::async_trait;

use crate::domain::admin::AdminLogEntry;
use crate::domain::foundation::DomainError;

/// Store port for the append-only moderation audit log.
///
/// Entries are never updated or removed.
#[async_trait]
pub trait AdminLogStore: Send + Sync {
    /// Append one audit entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, entry: &AdminLogEntry) -> Result<(), DomainError>;

    /// Page through the log, `created_at` descending.
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<AdminLogEntry>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_log_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AdminLogStore) {}
    }
}
