//! ListAllUsersHandler - Admin query for the member roster.

use std::sync::Arc;

use crate::domain::admin::AdminError;
use crate::domain::foundation::Identity;
use crate::domain::user::User;
use crate::ports::UserDirectory;

use super::guard::ensure_admin;

const DEFAULT_LIMIT: u32 = 100;

/// Query to page through every non-admin profile.
#[derive(Debug, Clone)]
pub struct ListAllUsersQuery {
    pub caller: Identity,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for the admin member listing.
pub struct ListAllUsersHandler {
    directory: Arc<dyn UserDirectory>,
}

impl ListAllUsersHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: ListAllUsersQuery) -> Result<Vec<User>, AdminError> {
        // 1. Admins only
        ensure_admin(self.directory.as_ref(), &query.caller).await?;

        // 2. Members only, banned and private included, admins excluded
        let users = self
            .directory
            .list_members(
                query.skip.unwrap_or(0),
                query.limit.unwrap_or(DEFAULT_LIMIT),
            )
            .await
            .map_err(AdminError::from)?;
        Ok(users)
    }
}
