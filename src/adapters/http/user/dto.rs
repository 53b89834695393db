//! HTTP DTOs for user endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to register a new profile.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

/// Request to update the caller's own profile. Absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub skills_offered: Option<Vec<String>>,
    #[serde(default)]
    pub skills_wanted: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// Query parameters for browsing profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One marketplace profile for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub is_public: bool,
    pub is_verified: bool,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.identity().to_string(),
            username: user.username().to_string(),
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            location: user.location().map(|s| s.to_string()),
            availability: user.availability().map(|s| s.to_string()),
            skills_offered: user.skills_offered().to_vec(),
            skills_wanted: user.skills_wanted().to_vec(),
            is_public: user.is_public(),
            is_verified: user.is_verified(),
            role: user.role().as_str().to_string(),
            rating: user.rating(),
            created_at: user.created_at().as_datetime().to_rfc3339(),
            updated_at: user.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// List of visible profiles.
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        Self {
            items: users.into_iter().map(Into::into).collect(),
        }
    }
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
    use crate::domain::foundation::Identity;

    #[test]
    fn register_request_fills_defaults() {
        let json = r#"{"username": "alice_chen", "full_name": "Alice Chen", "email": "alice@example.com"}"#;
        let req: RegisterUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice_chen");
        assert!(req.location.is_none());
        assert!(req.skills_offered.is_empty());
        assert!(req.is_public);
    }

    #[test]
    fn register_request_honours_explicit_visibility() {
        let json = r#"{"username": "alice_chen", "full_name": "Alice Chen", "email": "alice@example.com", "is_public": false}"#;
        let req: RegisterUserRequest = serde_json::from_str(json).unwrap();
        assert!(!req.is_public);
    }

    #[test]
    fn update_request_keeps_absent_fields_none() {
        let json = r#"{"location": "Porto"}"#;
        let req: UpdateProfileRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.location, Some("Porto".to_string()));
        assert!(req.username.is_none());
        assert!(req.skills_offered.is_none());
        assert!(req.is_public.is_none());
    }

    #[test]
    fn user_response_conversion() {
        let user = User::new(
            Identity::new("user_alice").unwrap(),
            "alice_chen".to_string(),
            "Alice Chen".to_string(),
            "alice@example.com".to_string(),
            Some("Lisbon".to_string()),
            None,
            vec!["guitar".to_string()],
            vec!["spanish".to_string()],
            true,
        )
        .unwrap();

        let response: UserResponse = user.into();
        assert_eq!(response.id, "user_alice");
        assert_eq!(response.role, "user");
        assert_eq!(response.location, Some("Lisbon".to_string()));
        assert!(response.rating.is_none());
        assert!(!response.created_at.is_empty());
    }

    #[test]
    fn user_response_hides_ban_details() {
        let user = User::new(
            Identity::new("user_alice").unwrap(),
            "alice_chen".to_string(),
            "Alice Chen".to_string(),
            "alice@example.com".to_string(),
            None,
            None,
            vec![],
            vec![],
            true,
        )
        .unwrap();

        let response: UserResponse = user.into();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("is_banned").is_none());
        assert!(json.get("ban_reason").is_none());
    }

    #[test]
    fn error_response_bad_request_creates_correctly() {
        let error = ErrorResponse::bad_request("Invalid input");
        assert_eq!(error.code, "BAD_REQUEST");
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn error_response_conflict_creates_correctly() {
        let error = ErrorResponse::conflict("A user with this email already exists");
        assert_eq!(error.code, "CONFLICT");
    }
}
