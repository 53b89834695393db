//! HTTP DTOs for swap endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::swap::SwapWithNames;
use crate::domain::swap::{ParticipantRole, Swap, SwapStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open a swap against another user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSwapRequest {
    pub receiver_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to leave feedback and a 1-5 rating on an accepted swap.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub feedback: String,
    pub rating: i16,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One swap request for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SwapResponse {
    pub id: String,
    pub requester_id: String,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: SwapStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_rating: Option<i16>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Swap> for SwapResponse {
    fn from(swap: Swap) -> Self {
        let (requester_feedback, requester_rating) = swap.feedback(ParticipantRole::Requester);
        let (receiver_feedback, receiver_rating) = swap.feedback(ParticipantRole::Receiver);
        Self {
            id: swap.id().to_string(),
            requester_id: swap.requester().to_string(),
            receiver_id: swap.receiver().to_string(),
            message: swap.message().map(|s| s.to_string()),
            status: swap.status(),
            requester_feedback: requester_feedback.map(|s| s.to_string()),
            requester_rating: requester_rating.map(|s| s.as_i16()),
            receiver_feedback: receiver_feedback.map(|s| s.to_string()),
            receiver_rating: receiver_rating.map(|s| s.as_i16()),
            created_at: swap.created_at().as_datetime().to_rfc3339(),
            updated_at: swap.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One swap in a history listing, joined with display names.
#[derive(Debug, Clone, Serialize)]
pub struct SwapSummaryResponse {
    pub id: String,
    pub requester_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: SwapStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_rating: Option<i16>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SwapWithNames> for SwapSummaryResponse {
    fn from(item: SwapWithNames) -> Self {
        let swap: SwapResponse = item.swap.into();
        Self {
            id: swap.id,
            requester_id: swap.requester_id,
            requester_name: item.requester_name,
            receiver_id: swap.receiver_id,
            receiver_name: item.receiver_name,
            message: swap.message,
            status: swap.status,
            requester_feedback: swap.requester_feedback,
            requester_rating: swap.requester_rating,
            receiver_feedback: swap.receiver_feedback,
            receiver_rating: swap.receiver_rating,
            created_at: swap.created_at,
            updated_at: swap.updated_at,
        }
    }
}

/// The caller's swap history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct SwapListResponse {
    pub items: Vec<SwapSummaryResponse>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self {
            code: "INVALID_STATE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Identity, Score, SwapId, Timestamp};

    fn swap() -> Swap {
        Swap::new(
            SwapId::new(),
            Identity::new("user_alice").unwrap(),
            Identity::new("user_bob").unwrap(),
            Some("Guitar for Spanish?".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn create_swap_request_deserializes() {
        let json = r#"{"receiver_id": "user_bob"}"#;
        let req: CreateSwapRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.receiver_id, "user_bob");
        assert!(req.message.is_none());
    }

    #[test]
    fn feedback_request_deserializes() {
        let json = r#"{"feedback": "Great teacher", "rating": 5}"#;
        let req: SubmitFeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.rating, 5);
    }

    #[test]
    fn swap_response_conversion() {
        let response: SwapResponse = swap().into();
        assert_eq!(response.requester_id, "user_alice");
        assert_eq!(response.status, SwapStatus::Pending);
        assert_eq!(response.message, Some("Guitar for Spanish?".to_string()));
        assert!(response.requester_rating.is_none());
    }

    #[test]
    fn swap_response_serializes_status_lowercase() {
        let response: SwapResponse = swap().into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "pending");
        // Empty feedback slots are omitted entirely
        assert!(json.get("requester_feedback").is_none());
    }

    #[test]
    fn summary_response_carries_the_names() {
        let now = Timestamp::now();
        let full = Swap::reconstitute(
            SwapId::new(),
            Identity::new("user_alice").unwrap(),
            Identity::new("user_bob").unwrap(),
            None,
            SwapStatus::Completed,
            Some("Patient and clear".to_string()),
            Some(Score::try_from_i16(5).unwrap()),
            None,
            None,
            now,
            now,
        );
        let item = SwapWithNames {
            swap: full,
            requester_name: Some("Alice Chen".to_string()),
            receiver_name: None,
        };

        let response: SwapSummaryResponse = item.into();
        assert_eq!(response.requester_name, Some("Alice Chen".to_string()));
        assert!(response.receiver_name.is_none());
        assert_eq!(response.requester_rating, Some(5));
    }
}
