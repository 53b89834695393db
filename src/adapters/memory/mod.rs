//! In-memory adapters.
//!
//! Lock-based implementations of the store ports, used by handler and
//! integration tests. None of them persist anything.

pub mod admin_log_store;
pub mod broadcast_store;
pub mod swap_store;
pub mod user_directory;

pub use admin_log_store::InMemoryAdminLogStore;
pub use broadcast_store::InMemoryBroadcastStore;
pub use swap_store::InMemorySwapStore;
pub use user_directory::InMemoryUserDirectory;
