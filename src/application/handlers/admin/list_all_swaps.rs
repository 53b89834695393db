//! ListAllSwapsHandler - Admin query for the full swap ledger.

use std::sync::Arc;

use crate::domain::admin::AdminError;
use crate::domain::foundation::Identity;
use crate::domain::swap::Swap;
use crate::ports::{SwapStore, UserDirectory};

use super::guard::ensure_admin;

const DEFAULT_LIMIT: u32 = 100;

/// Query to page through every swap, newest first.
#[derive(Debug, Clone)]
pub struct ListAllSwapsQuery {
    pub caller: Identity,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Handler for the admin swap listing.
pub struct ListAllSwapsHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
}

impl ListAllSwapsHandler {
    pub fn new(swaps: Arc<dyn SwapStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, directory }
    }

    pub async fn handle(&self, query: ListAllSwapsQuery) -> Result<Vec<Swap>, AdminError> {
        // 1. Admins only
        ensure_admin(self.directory.as_ref(), &query.caller).await?;

        // 2. Page through, created descending
        let swaps = self
            .swaps
            .list_all(
                query.skip.unwrap_or(0),
                query.limit.unwrap_or(DEFAULT_LIMIT),
            )
            .await
            .map_err(AdminError::from)?;
        Ok(swaps)
    }
}
