//! PostgreSQL adapters - Database implementations for store ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSwapStore` - Swap aggregates with conditional writes
//! - `PostgresUserDirectory` - User profiles with a JSONB ratings list
//! - `PostgresAdminLogStore` - Append-only moderation audit log
//! - `PostgresBroadcastStore` - Stored platform announcements

mod admin_log_store;
mod broadcast_store;
mod swap_store;
mod user_directory;

pub use admin_log_store::PostgresAdminLogStore;
pub use broadcast_store::PostgresBroadcastStore;
pub use swap_store::PostgresSwapStore;
pub use user_directory::PostgresUserDirectory;
