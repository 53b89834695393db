//! In-memory audit log store for tests and local composition.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::admin::AdminLogEntry;
use crate::domain::foundation::DomainError;
use crate::ports::AdminLogStore;

/// In-memory [`AdminLogStore`].
pub struct InMemoryAdminLogStore {
    entries: RwLock<Vec<AdminLogEntry>>,
}

impl InMemoryAdminLogStore {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns every stored entry in insertion order, for assertions.
    pub fn raw_entries(&self) -> Vec<AdminLogEntry> {
        self.entries
            .read()
            .expect("InMemoryAdminLogStore: entries lock poisoned")
            .clone()
    }
}

impl Default for InMemoryAdminLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminLogStore for InMemoryAdminLogStore {
    async fn append(&self, entry: &AdminLogEntry) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .expect("InMemoryAdminLogStore: entries lock poisoned");
        entries.push(entry.clone());
        Ok(())
    }

    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<AdminLogEntry>, DomainError> {
        let entries = self
            .entries
            .read()
            .expect("InMemoryAdminLogStore: entries lock poisoned");
        let mut page: Vec<AdminLogEntry> = entries.clone();
        page.sort_by_key(|e| std::cmp::Reverse(*e.created_at()));
        Ok(page
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
