//! Identity verification port.
//!
//! The platform sits behind an external identity provider; requests
//! arrive with the caller's identity already resolved and forwarded in
//! a header. This port validates that forwarded value and turns it into
//! a canonical [`Identity`].
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::MissingIdentity` for empty values
//! - Return `AuthError::InvalidIdentity` for malformed values
//! - Return `AuthError::ServiceUnavailable` for transient provider errors

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Identity};

/// Validates a forwarded identity header value.
///
/// HTTP middleware uses this to authenticate every request before a
/// handler runs.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validate a raw header value and return the canonical identity.
    async fn verify(&self, raw: &str) -> Result<Identity, AuthError>;
}
