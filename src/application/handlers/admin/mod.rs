//! Admin command and query handlers.
//!
//! Every handler authorizes the caller against the directory's role
//! field before doing anything else.

mod get_audit_log;
mod get_platform_stats;
mod guard;
mod list_all_swaps;
mod list_all_users;
mod moderate_swap;
mod moderate_user;
mod send_broadcast;

pub use get_audit_log::{GetAuditLogHandler, GetAuditLogQuery};
pub use get_platform_stats::{GetPlatformStatsHandler, GetPlatformStatsQuery};
pub use list_all_swaps::{ListAllSwapsHandler, ListAllSwapsQuery};
pub use list_all_users::{ListAllUsersHandler, ListAllUsersQuery};
pub use moderate_swap::{
    ModerateSwapCommand, ModerateSwapHandler, ModerateSwapResult, SwapModeration,
};
pub use moderate_user::{
    ModerateUserCommand, ModerateUserHandler, ModerateUserResult, UserModeration,
};
pub use send_broadcast::{SendBroadcastCommand, SendBroadcastHandler, SendBroadcastResult};
