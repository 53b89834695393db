//! Broadcast store port.

use async_trait::async_trait;

use crate::domain::admin::Broadcast;
use crate::domain::foundation::DomainError;

/// Store port for platform announcements.
///
/// Broadcasts are stored for a later delivery pipeline; nothing in this
/// service reads them back.
#[async_trait]
pub trait BroadcastStore: Send + Sync {
    /// Append one broadcast.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, broadcast: &Broadcast) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn BroadcastStore) {}
    }
}
