//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `SwapStore` - Swap aggregate persistence with conditional writes
//! - `UserDirectory` - User profiles keyed by external identity
//! - `AdminLogStore` - Append-only moderation audit log
//! - `BroadcastStore` - Stored platform announcements
//!
//! ## Auth Ports
//!
//! - `IdentityVerifier` - Validates forwarded identity header values

mod admin_log_store;
mod broadcast_store;
mod identity_verifier;
mod swap_store;
mod user_directory;

pub use admin_log_store::AdminLogStore;
pub use broadcast_store::BroadcastStore;
pub use identity_verifier::IdentityVerifier;
pub use swap_store::SwapStore;
pub use user_directory::UserDirectory;
