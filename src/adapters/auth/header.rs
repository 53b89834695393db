//! Forwarded-header identity verifier.
//!
//! The platform runs behind a gateway that authenticates the user and
//! forwards their external identity in a request header. This adapter
//! implements the `IdentityVerifier` port by validating the shape of
//! that forwarded value; it performs no provider round-trip.
//!
//! # Security
//!
//! The header is only trustworthy when the gateway strips any
//! client-supplied copy. Deployments must not expose this service
//! directly to the internet.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Identity};
use crate::ports::IdentityVerifier;

/// Longest identity value the gateway is expected to forward.
const MAX_IDENTITY_LENGTH: usize = 255;

/// Identity verifier for gateway-forwarded identity headers.
#[derive(Debug, Clone, Default)]
pub struct HeaderIdentityVerifier;

impl HeaderIdentityVerifier {
    /// Creates a new HeaderIdentityVerifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityVerifier for HeaderIdentityVerifier {
    async fn verify(&self, raw: &str) -> Result<Identity, AuthError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthError::MissingIdentity);
        }
        if trimmed.len() > MAX_IDENTITY_LENGTH {
            return Err(AuthError::invalid_identity("value too long"));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AuthError::invalid_identity(
                "value contains whitespace or control characters",
            ));
        }

        Identity::new(trimmed).map_err(|_| AuthError::MissingIdentity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_a_plain_forwarded_identity() {
        let verifier = HeaderIdentityVerifier::new();
        let identity = verifier.verify("user_2abc").await.unwrap();
        assert_eq!(identity.as_str(), "user_2abc");
    }

    #[tokio::test]
    async fn trims_surrounding_whitespace() {
        let verifier = HeaderIdentityVerifier::new();
        let identity = verifier.verify("  user_2abc  ").await.unwrap();
        assert_eq!(identity.as_str(), "user_2abc");
    }

    #[tokio::test]
    async fn rejects_empty_and_blank_values() {
        let verifier = HeaderIdentityVerifier::new();
        assert!(matches!(
            verifier.verify("").await,
            Err(AuthError::MissingIdentity)
        ));
        assert!(matches!(
            verifier.verify("   ").await,
            Err(AuthError::MissingIdentity)
        ));
    }

    #[tokio::test]
    async fn rejects_embedded_whitespace() {
        let verifier = HeaderIdentityVerifier::new();
        assert!(matches!(
            verifier.verify("user 2abc").await,
            Err(AuthError::InvalidIdentity(_))
        ));
        assert!(matches!(
            verifier.verify("user\t2abc").await,
            Err(AuthError::InvalidIdentity(_))
        ));
    }

    #[tokio::test]
    async fn rejects_oversized_values() {
        let verifier = HeaderIdentityVerifier::new();
        let long = "u".repeat(MAX_IDENTITY_LENGTH + 1);
        assert!(matches!(
            verifier.verify(&long).await,
            Err(AuthError::InvalidIdentity(_))
        ));
    }
}
