//! ListUsersHandler - Query handler for browsing public profiles.

use std::sync::Arc;

use crate::domain::user::{User, UserError};
use crate::ports::UserDirectory;

const DEFAULT_LIMIT: u32 = 100;

/// Query to browse visible profiles, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListUsersQuery {
    fn window(&self) -> (u32, u32) {
        (self.skip.unwrap_or(0), self.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

/// Handler for listing visible profiles.
pub struct ListUsersHandler {
    directory: Arc<dyn UserDirectory>,
}

impl ListUsersHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<User>, UserError> {
        let (skip, limit) = query.window();
        let users = self.directory.list_visible(skip, limit).await?;
        Ok(users)
    }
}
