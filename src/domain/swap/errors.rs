//! Swap-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, Identity, SwapId};

/// Swap-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// Swap was not found.
    NotFound(SwapId),
    /// A referenced user does not exist.
    UserNotFound(Identity),
    /// Caller is not allowed to perform this operation.
    Forbidden(String),
    /// Invalid state for operation.
    InvalidState(String),
    /// A pending request between the same pair already exists.
    DuplicateRequest,
    /// This side already left feedback for the swap.
    FeedbackAlreadySubmitted,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SwapError {
    pub fn not_found(id: SwapId) -> Self {
        SwapError::NotFound(id)
    }
    pub fn user_not_found(identity: Identity) -> Self {
        SwapError::UserNotFound(identity)
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        SwapError::Forbidden(message.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SwapError::InvalidState(message.into())
    }
    pub fn duplicate_request() -> Self {
        SwapError::DuplicateRequest
    }
    pub fn feedback_already_submitted() -> Self {
        SwapError::FeedbackAlreadySubmitted
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SwapError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SwapError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SwapError::NotFound(_) => ErrorCode::SwapNotFound,
            SwapError::UserNotFound(_) => ErrorCode::UserNotFound,
            SwapError::Forbidden(_) => ErrorCode::Forbidden,
            SwapError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SwapError::DuplicateRequest => ErrorCode::DuplicateSwapRequest,
            SwapError::FeedbackAlreadySubmitted => ErrorCode::FeedbackAlreadySubmitted,
            SwapError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SwapError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SwapError::NotFound(id) => format!("Swap not found: {}", id),
            SwapError::UserNotFound(identity) => format!("User not found: {}", identity),
            SwapError::Forbidden(msg) => msg.clone(),
            SwapError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SwapError::DuplicateRequest => {
                "A pending swap request between these users already exists".to_string()
            }
            SwapError::FeedbackAlreadySubmitted => {
                "Feedback was already submitted for this swap".to_string()
            }
            SwapError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SwapError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SwapError {}

impl From<DomainError> for SwapError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SwapNotFound => SwapError::Forbidden(err.message),
            ErrorCode::UserNotFound => SwapError::Forbidden(err.message),
            ErrorCode::Forbidden => SwapError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => SwapError::InvalidState(err.message),
            ErrorCode::FeedbackAlreadySubmitted => SwapError::FeedbackAlreadySubmitted,
            ErrorCode::DuplicateSwapRequest => SwapError::DuplicateRequest,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                SwapError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            _ => SwapError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            SwapError::not_found(SwapId::new()).code(),
            ErrorCode::SwapNotFound
        );
        assert_eq!(
            SwapError::duplicate_request().code(),
            ErrorCode::DuplicateSwapRequest
        );
        assert_eq!(
            SwapError::feedback_already_submitted().code(),
            ErrorCode::FeedbackAlreadySubmitted
        );
        assert_eq!(
            SwapError::invalid_state("Swap is not pending").code(),
            ErrorCode::InvalidStateTransition
        );
    }

    #[test]
    fn forbidden_keeps_the_specific_message() {
        let err = SwapError::forbidden("Only the requester can cancel a swap request");
        assert_eq!(err.message(), "Only the requester can cancel a swap request");
    }

    #[test]
    fn domain_error_maps_by_code() {
        let err: SwapError = DomainError::new(
            ErrorCode::InvalidStateTransition,
            "Swap is not pending",
        )
        .into();
        assert_eq!(err, SwapError::InvalidState("Swap is not pending".to_string()));

        let err: SwapError = DomainError::new(
            ErrorCode::FeedbackAlreadySubmitted,
            "Feedback was already submitted for this swap",
        )
        .into();
        assert_eq!(err, SwapError::FeedbackAlreadySubmitted);
    }

    #[test]
    fn validation_mapping_recovers_the_field() {
        let err: SwapError =
            DomainError::validation("receiver_id", "Requester and receiver must be different users")
                .into();
        assert_eq!(
            err,
            SwapError::ValidationFailed {
                field: "receiver_id".to_string(),
                message: "Requester and receiver must be different users".to_string(),
            }
        );
    }
}
