//! GetUserHandler - Query handler for fetching one profile.

use std::sync::Arc;

use crate::domain::foundation::Identity;
use crate::domain::user::{User, UserError};
use crate::ports::UserDirectory;

/// Query to fetch a profile by its external identity.
#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub identity: Identity,
}

/// Handler for fetching profiles.
pub struct GetUserHandler {
    directory: Arc<dyn UserDirectory>,
}

impl GetUserHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, UserError> {
        self.directory
            .find_by_identity(&query.identity)
            .await?
            .ok_or(UserError::NotFound(query.identity))
    }
}
