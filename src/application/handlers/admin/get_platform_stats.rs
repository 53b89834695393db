//! GetPlatformStatsHandler - Admin query for platform counters.

use std::sync::Arc;

use crate::domain::admin::{AdminError, PlatformStats};
use crate::domain::foundation::{Identity, Timestamp};
use crate::domain::swap::SwapStatus;
use crate::ports::{SwapStore, UserDirectory};

use super::guard::ensure_admin;

const TRAILING_WINDOW_DAYS: i64 = 30;

/// Query for the stats dashboard.
#[derive(Debug, Clone)]
pub struct GetPlatformStatsQuery {
    pub caller: Identity,
}

/// Handler computing the platform counters.
pub struct GetPlatformStatsHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
}

impl GetPlatformStatsHandler {
    pub fn new(swaps: Arc<dyn SwapStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, directory }
    }

    pub async fn handle(&self, query: GetPlatformStatsQuery) -> Result<PlatformStats, AdminError> {
        ensure_admin(self.directory.as_ref(), &query.caller).await?;

        let since = Timestamp::now().minus_days(TRAILING_WINDOW_DAYS);

        let stats = PlatformStats {
            total_users: self.directory.count_all().await.map_err(AdminError::from)?,
            total_swaps: self.swaps.count_all().await.map_err(AdminError::from)?,
            pending_swaps: self.count(SwapStatus::Pending).await?,
            accepted_swaps: self.count(SwapStatus::Accepted).await?,
            rejected_swaps: self.count(SwapStatus::Rejected).await?,
            cancelled_swaps: self.count(SwapStatus::Cancelled).await?,
            completed_swaps: self.count(SwapStatus::Completed).await?,
            users_last_30_days: self
                .directory
                .count_created_since(&since)
                .await
                .map_err(AdminError::from)?,
            swaps_last_30_days: self
                .swaps
                .count_created_since(&since)
                .await
                .map_err(AdminError::from)?,
        };
        Ok(stats)
    }

    async fn count(&self, status: SwapStatus) -> Result<u64, AdminError> {
        self.swaps
            .count_by_status(status)
            .await
            .map_err(AdminError::from)
    }
}
