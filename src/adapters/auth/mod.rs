//! Authentication adapters.
//!
//! Implementations of the `IdentityVerifier` port:
//!
//! - `header` - Production verifier for gateway-forwarded identity headers
//! - `mock_verifier` - Test implementation with a registered-value set

mod header;
mod mock_verifier;

pub use header::HeaderIdentityVerifier;
pub use mock_verifier::MockIdentityVerifier;
