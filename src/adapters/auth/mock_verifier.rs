//! Mock identity verifier for testing.
//!
//! Implements the `IdentityVerifier` port against an in-memory set of
//! accepted values, avoiding the gateway in tests.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Identity};
use crate::ports::IdentityVerifier;

/// Mock identity verifier.
///
/// Accepts only registered values. Unknown values return
/// `InvalidIdentity`; a forced error overrides everything.
#[derive(Debug, Default)]
pub struct MockIdentityVerifier {
    /// Accepted identity values.
    known: RwLock<HashSet<String>>,
    /// Optional error to return for all verifications (for error testing).
    force_error: RwLock<Option<AuthError>>,
}

impl MockIdentityVerifier {
    /// Creates a new empty mock verifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an accepted identity value.
    pub fn with_identity(self, raw: impl Into<String>) -> Self {
        self.known.write().unwrap().insert(raw.into());
        self
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Registers an accepted value at runtime.
    pub fn add_identity(&self, raw: impl Into<String>) {
        self.known.write().unwrap().insert(raw.into());
    }

    /// Removes a value, making it invalid.
    pub fn remove_identity(&self, raw: &str) {
        self.known.write().unwrap().remove(raw);
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, raw: &str) -> Result<Identity, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        if raw.is_empty() {
            return Err(AuthError::MissingIdentity);
        }
        if !self.known.read().unwrap().contains(raw) {
            return Err(AuthError::invalid_identity(raw));
        }

        Identity::new(raw).map_err(|_| AuthError::MissingIdentity)
    }
}
