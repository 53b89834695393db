//! HTTP DTOs for admin endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::adapters::http::swap::SwapResponse;
use crate::domain::admin::{AdminLogEntry, Broadcast, PlatformStats};
use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Optional body for moderation endpoints carrying the stated reason.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to publish a platform-wide announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct SendBroadcastRequest {
    pub title: String,
    pub message: String,
}

/// Query parameters for paginated admin listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One member account as seen from the moderation roster.
///
/// Unlike the public profile view this includes the moderation flags.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
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
    pub is_banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    pub is_verified: bool,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for AdminUserResponse {
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
            is_banned: user.is_banned(),
            ban_reason: user.ban_reason().map(|s| s.to_string()),
            is_verified: user.is_verified(),
            role: user.role().as_str().to_string(),
            rating: user.rating(),
            created_at: user.created_at().as_datetime().to_rfc3339(),
            updated_at: user.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// The moderation roster page.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserListResponse {
    pub items: Vec<AdminUserResponse>,
}

/// The full swap ledger page.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSwapListResponse {
    pub items: Vec<SwapResponse>,
}

/// Acknowledgement for a moderation action, pointing at its audit entry.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationResponse {
    pub message: String,
    pub log_id: String,
}

/// A stored announcement.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub sent_by: String,
    pub created_at: String,
}

impl From<Broadcast> for BroadcastResponse {
    fn from(broadcast: Broadcast) -> Self {
        Self {
            id: broadcast.id().to_string(),
            title: broadcast.title().to_string(),
            message: broadcast.message().to_string(),
            sent_by: broadcast.sent_by().to_string(),
            created_at: broadcast.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One audit trail entry.
#[derive(Debug, Clone, Serialize)]
pub struct AdminLogResponse {
    pub id: String,
    pub admin_id: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<AdminLogEntry> for AdminLogResponse {
    fn from(entry: AdminLogEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            admin_id: entry.admin().to_string(),
            action: entry.action().as_str().to_string(),
            target_type: entry.target_kind().as_str().to_string(),
            target_id: entry.target_id().to_string(),
            reason: entry.reason().map(|s| s.to_string()),
            created_at: entry.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// The audit trail page, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct AdminLogListResponse {
    pub items: Vec<AdminLogResponse>,
}

/// Platform counters for the stats dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStatsResponse {
    pub total_users: u64,
    pub total_swaps: u64,
    pub pending_swaps: u64,
    pub accepted_swaps: u64,
    pub rejected_swaps: u64,
    pub cancelled_swaps: u64,
    pub completed_swaps: u64,
    pub users_last_30_days: u64,
    pub swaps_last_30_days: u64,
}

impl From<PlatformStats> for PlatformStatsResponse {
    fn from(stats: PlatformStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_swaps: stats.total_swaps,
            pending_swaps: stats.pending_swaps,
            accepted_swaps: stats.accepted_swaps,
            rejected_swaps: stats.rejected_swaps,
            cancelled_swaps: stats.cancelled_swaps,
            completed_swaps: stats.completed_swaps,
            users_last_30_days: stats.users_last_30_days,
            swaps_last_30_days: stats.swaps_last_30_days,
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

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self {
            code: "INVALID_STATE".to_string(),
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
    use crate::domain::admin::AdminAction;
    use crate::domain::foundation::{BroadcastId, Identity, LogEntryId, Timestamp};
    use crate::domain::user::UserRole;

    #[test]
    fn moderation_request_tolerates_empty_object() {
        let req: ModerationRequest = serde_json::from_str("{}").unwrap();
        assert!(req.reason.is_none());
    }

    #[test]
    fn admin_user_response_exposes_ban_details() {
        let mut user = User::new(
            Identity::new("user_bob").unwrap(),
            "bob_okafor".to_string(),
            "Bob Okafor".to_string(),
            "bob@example.com".to_string(),
            None,
            None,
            vec![],
            vec![],
            true,
        )
        .unwrap();
        user.set_banned(true, Some("spam".to_string()));

        let response: AdminUserResponse = user.into();
        assert!(response.is_banned);
        assert_eq!(response.ban_reason, Some("spam".to_string()));
        assert_eq!(response.role, UserRole::User.as_str());
    }

    #[test]
    fn log_response_conversion() {
        let entry = AdminLogEntry::new(
            LogEntryId::new(),
            Identity::new("user_root").unwrap(),
            AdminAction::BanUser,
            "user_bob".to_string(),
            Some("spam".to_string()),
        )
        .unwrap();

        let response: AdminLogResponse = entry.into();
        assert_eq!(response.action, "ban_user");
        assert_eq!(response.target_type, "user");
        assert_eq!(response.target_id, "user_bob");
        assert_eq!(response.reason, Some("spam".to_string()));
    }

    #[test]
    fn broadcast_response_conversion() {
        let broadcast = Broadcast::reconstitute(
            BroadcastId::new(),
            "Maintenance".to_string(),
            "Down Sunday 02:00 UTC".to_string(),
            Identity::new("user_root").unwrap(),
            Timestamp::now(),
        );

        let response: BroadcastResponse = broadcast.into();
        assert_eq!(response.title, "Maintenance");
        assert_eq!(response.sent_by, "user_root");
    }

    #[test]
    fn stats_response_conversion() {
        let stats = PlatformStats {
            total_users: 12,
            total_swaps: 30,
            pending_swaps: 4,
            ..Default::default()
        };

        let response: PlatformStatsResponse = stats.into();
        assert_eq!(response.total_users, 12);
        assert_eq!(response.pending_swaps, 4);
        assert_eq!(response.completed_swaps, 0);
    }
}
