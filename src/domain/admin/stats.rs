//! Platform statistics read model.

/// Counters shown on the admin dashboard.
///
/// The "last 30 days" windows are trailing windows from the moment of
/// the query, not calendar months.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_swaps: u64,
    pub pending_swaps: u64,
    pub accepted_swaps: u64,
    pub rejected_swaps: u64,
    pub cancelled_swaps: u64,
    pub completed_swaps: u64,
    pub users_last_30_days: u64,
    pub swaps_last_30_days: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = PlatformStats::default();
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.total_swaps, 0);
        assert_eq!(stats.users_last_30_days, 0);
    }
}
