//! Admin-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, Identity, SwapId};
use crate::domain::swap::SwapError;
use crate::domain::user::UserError;

/// Errors from administrative operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Caller is not an administrator.
    NotAdmin,
    /// Target user was not found.
    UserNotFound(Identity),
    /// Target swap was not found.
    SwapNotFound(SwapId),
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AdminError {
    pub fn not_admin() -> Self {
        AdminError::NotAdmin
    }
    pub fn user_not_found(identity: Identity) -> Self {
        AdminError::UserNotFound(identity)
    }
    pub fn swap_not_found(id: SwapId) -> Self {
        AdminError::SwapNotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AdminError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AdminError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::NotAdmin => ErrorCode::Forbidden,
            AdminError::UserNotFound(_) => ErrorCode::UserNotFound,
            AdminError::SwapNotFound(_) => ErrorCode::SwapNotFound,
            AdminError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AdminError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AdminError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AdminError::NotAdmin => "Admin access required".to_string(),
            AdminError::UserNotFound(identity) => format!("User not found: {}", identity),
            AdminError::SwapNotFound(id) => format!("Swap not found: {}", id),
            AdminError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AdminError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AdminError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => AdminError::NotAdmin,
            ErrorCode::InvalidStateTransition => AdminError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                AdminError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            _ => AdminError::Infrastructure(err.message),
        }
    }
}

impl From<SwapError> for AdminError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::NotFound(id) => AdminError::SwapNotFound(id),
            SwapError::UserNotFound(identity) => AdminError::UserNotFound(identity),
            SwapError::InvalidState(msg) => AdminError::InvalidState(msg),
            SwapError::ValidationFailed { field, message } => {
                AdminError::ValidationFailed { field, message }
            }
            SwapError::Infrastructure(msg) => AdminError::Infrastructure(msg),
            other => AdminError::Infrastructure(other.message()),
        }
    }
}

impl From<UserError> for AdminError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(identity) => AdminError::UserNotFound(identity),
            UserError::ValidationFailed { field, message } => {
                AdminError::ValidationFailed { field, message }
            }
            UserError::Infrastructure(msg) => AdminError::Infrastructure(msg),
            other => AdminError::Infrastructure(other.message()),
        }
    }
}
