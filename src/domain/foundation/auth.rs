//! Caller identity types for the domain layer.
//!
//! Authentication itself is delegated: an upstream gateway authenticates the
//! user and forwards their external identity with each request. These types
//! carry that identity once the `IdentityVerifier` port has accepted it, so
//! no provider specifics leak past the middleware.

use super::Identity;
use thiserror::Error;

/// The verified caller of a request.
///
/// Populated by the identity middleware after the `IdentityVerifier` port
/// accepts the forwarded identity value, and read back out of request
/// extensions by the `RequireIdentity` extractor.
#[derive(Debug, Clone)]
pub struct Caller {
    /// External identity of the caller.
    pub identity: Identity,
}

impl Caller {
    /// Creates a new verified caller.
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

/// Errors raised while resolving the caller's identity.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No identity was forwarded with the request.
    #[error("Missing identity")]
    MissingIdentity,

    /// The forwarded identity value is unusable.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// The identity provider could not be reached.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates an invalid identity error with a reason.
    pub fn invalid_identity(reason: impl Into<String>) -> Self {
        Self::InvalidIdentity(reason.into())
    }

    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_exposes_identity() {
        let caller = Caller::new(Identity::new("user_2abc").unwrap());
        assert_eq!(caller.identity.as_str(), "user_2abc");
    }

    #[test]
    fn auth_error_missing_identity_displays_correctly() {
        assert_eq!(format!("{}", AuthError::MissingIdentity), "Missing identity");
    }

    #[test]
    fn auth_error_invalid_identity_displays_reason() {
        let err = AuthError::invalid_identity("empty value");
        assert_eq!(format!("{}", err), "Invalid identity: empty value");
    }

    #[test]
    fn auth_error_is_transient_only_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::MissingIdentity.is_transient());
        assert!(!AuthError::invalid_identity("bad").is_transient());
    }
}
