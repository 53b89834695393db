//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (forwarded identity header)
///
/// The service trusts the gateway in front of it to authenticate callers
/// and forward their external identity in a request header. The only
/// knob is which header to read.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Name of the request header carrying the caller's identity
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.identity_header.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__IDENTITY_HEADER"));
        }
        // HTTP header names are ASCII tokens; anything else will never match
        if !self
            .identity_header
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidIdentityHeader);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
        }
    }
}

fn default_identity_header() -> String {
    "x-user-id".to_string()
}
