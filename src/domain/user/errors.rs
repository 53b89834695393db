//! User-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, Identity};

/// User-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(Identity),
    /// A profile with the same unique field already exists.
    Duplicate(String),
    /// Caller is not allowed to perform this operation.
    Forbidden(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(identity: Identity) -> Self {
        UserError::NotFound(identity)
    }
    pub fn duplicate(field: impl Into<String>) -> Self {
        UserError::Duplicate(field.into())
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        UserError::Forbidden(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::Duplicate(_) => ErrorCode::DuplicateUser,
            UserError::Forbidden(_) => ErrorCode::Forbidden,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(identity) => format!("User not found: {}", identity),
            UserError::Duplicate(field) => {
                format!("A user with this {} already exists", field)
            }
            UserError::Forbidden(msg) => msg.clone(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => UserError::Forbidden(err.message),
            ErrorCode::DuplicateUser => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "identity".to_string());
                UserError::Duplicate(field)
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                UserError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            _ => UserError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        let identity = Identity::new("user_alice").unwrap();
        assert_eq!(
            UserError::not_found(identity).code(),
            ErrorCode::UserNotFound
        );
        assert_eq!(UserError::duplicate("email").code(), ErrorCode::DuplicateUser);
        assert_eq!(
            UserError::forbidden("Cannot update another user's profile").code(),
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn duplicate_message_names_the_field() {
        assert_eq!(
            UserError::duplicate("email").message(),
            "A user with this email already exists"
        );
    }

    #[test]
    fn validation_domain_error_maps_with_field() {
        let err: UserError = DomainError::validation("username", "too short").into();
        assert_eq!(
            err,
            UserError::ValidationFailed {
                field: "username".to_string(),
                message: "too short".to_string(),
            }
        );
    }
}
