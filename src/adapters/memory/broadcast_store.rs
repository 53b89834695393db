//! In-memory broadcast store for tests and local composition.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::admin::Broadcast;
use crate::domain::foundation::DomainError;
use crate::ports::BroadcastStore;

/// In-memory [`BroadcastStore`].
pub struct InMemoryBroadcastStore {
    broadcasts: RwLock<Vec<Broadcast>>,
}

impl InMemoryBroadcastStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            broadcasts: RwLock::new(Vec::new()),
        }
    }

    /// Returns every stored broadcast in insertion order, for assertions.
    pub fn raw_broadcasts(&self) -> Vec<Broadcast> {
        self.broadcasts
            .read()
            .expect("InMemoryBroadcastStore: broadcasts lock poisoned")
            .clone()
    }
}

impl Default for InMemoryBroadcastStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastStore for InMemoryBroadcastStore {
    async fn append(&self, broadcast: &Broadcast) -> Result<(), DomainError> {
        let mut broadcasts = self
            .broadcasts
            .write()
            .expect("InMemoryBroadcastStore: broadcasts lock poisoned");
        broadcasts.push(broadcast.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BroadcastId, Identity};

    #[tokio::test]
    async fn appended_broadcasts_are_retained_in_order() {
        let store = InMemoryBroadcastStore::new();
        let first = Broadcast::new(
            BroadcastId::new(),
            "Maintenance window".to_string(),
            "Trading pauses Saturday 02:00 UTC".to_string(),
            Identity::new("user_root").unwrap(),
        )
        .unwrap();
        let second = Broadcast::new(
            BroadcastId::new(),
            "New categories".to_string(),
            "Music lessons are now a skill category".to_string(),
            Identity::new("user_root").unwrap(),
        )
        .unwrap();

        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let stored = store.raw_broadcasts();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title(), "Maintenance window");
        assert_eq!(stored[1].title(), "New categories");
    }
}
