//! Admin domain module.
//!
//! Moderation primitives: the append-only audit log of admin actions,
//! platform-wide broadcasts, and the statistics read model.
//!
//! # Module Structure
//!
//! - `log` - AdminAction and the audit log entry
//! - `broadcast` - Stored platform announcements
//! - `stats` - PlatformStats read model
//! - `errors` - Admin-specific error types

mod broadcast;
mod errors;
mod log;
mod stats;

pub use broadcast::{Broadcast, MAX_BODY_LENGTH, MAX_TITLE_LENGTH};
pub use errors::AdminError;
pub use log::{AdminAction, AdminLogEntry, TargetKind};
pub use stats::PlatformStats;
