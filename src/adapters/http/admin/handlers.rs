//! HTTP handlers for admin endpoints.
//!
//! Authorization happens in the application layer: every admin handler
//! checks the caller's role against the directory before acting, so these
//! functions only translate between HTTP and commands.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireIdentity;
use crate::application::handlers::admin::{
    GetAuditLogHandler, GetAuditLogQuery, GetPlatformStatsHandler, GetPlatformStatsQuery,
    ListAllSwapsHandler, ListAllSwapsQuery, ListAllUsersHandler, ListAllUsersQuery,
    ModerateSwapCommand, ModerateSwapHandler, ModerateUserCommand, ModerateUserHandler,
    SendBroadcastCommand, SendBroadcastHandler, SwapModeration, UserModeration,
};
use crate::domain::admin::AdminError;
use crate::domain::foundation::{Identity, SwapId};

use super::dto::{
    AdminLogListResponse, AdminSwapListResponse, AdminUserListResponse, BroadcastResponse,
    ErrorResponse, ModerationRequest, ModerationResponse, PageParams, PlatformStatsResponse,
    SendBroadcastRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminHandlers {
    list_users_handler: Arc<ListAllUsersHandler>,
    list_swaps_handler: Arc<ListAllSwapsHandler>,
    moderate_user_handler: Arc<ModerateUserHandler>,
    moderate_swap_handler: Arc<ModerateSwapHandler>,
    broadcast_handler: Arc<SendBroadcastHandler>,
    audit_log_handler: Arc<GetAuditLogHandler>,
    stats_handler: Arc<GetPlatformStatsHandler>,
}

impl AdminHandlers {
    pub fn new(
        list_users_handler: Arc<ListAllUsersHandler>,
        list_swaps_handler: Arc<ListAllSwapsHandler>,
        moderate_user_handler: Arc<ModerateUserHandler>,
        moderate_swap_handler: Arc<ModerateSwapHandler>,
        broadcast_handler: Arc<SendBroadcastHandler>,
        audit_log_handler: Arc<GetAuditLogHandler>,
        stats_handler: Arc<GetPlatformStatsHandler>,
    ) -> Self {
        Self {
            list_users_handler,
            list_swaps_handler,
            moderate_user_handler,
            moderate_swap_handler,
            broadcast_handler,
            audit_log_handler,
            stats_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats - Platform counters
pub async fn get_stats(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
) -> Response {
    let query = GetPlatformStatsQuery {
        caller: caller.identity,
    };

    match handlers.stats_handler.handle(query).await {
        Ok(stats) => {
            let response: PlatformStatsResponse = stats.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// GET /api/admin/users - Page through the member roster
pub async fn list_users(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Query(params): Query<PageParams>,
) -> Response {
    let query = ListAllUsersQuery {
        caller: caller.identity,
        skip: params.skip,
        limit: params.limit,
    };

    match handlers.list_users_handler.handle(query).await {
        Ok(users) => {
            let response = AdminUserListResponse {
                items: users.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// POST /api/admin/users/:id/verify - Mark an account verified
pub async fn verify_user(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_user(
        handlers,
        caller.identity,
        user_id,
        UserModeration::Verify,
        body,
        "User verified successfully",
    )
    .await
}

/// POST /api/admin/users/:id/suspend - Suspend an account
pub async fn suspend_user(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_user(
        handlers,
        caller.identity,
        user_id,
        UserModeration::Suspend,
        body,
        "User suspended successfully",
    )
    .await
}

/// POST /api/admin/users/:id/ban - Ban an account
pub async fn ban_user(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_user(
        handlers,
        caller.identity,
        user_id,
        UserModeration::Ban,
        body,
        "User banned successfully",
    )
    .await
}

/// DELETE /api/admin/users/:id - Remove an account
pub async fn delete_user(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_user(
        handlers,
        caller.identity,
        user_id,
        UserModeration::Delete,
        body,
        "User deleted successfully",
    )
    .await
}

async fn moderate_user(
    handlers: AdminHandlers,
    caller: Identity,
    user_id: String,
    action: UserModeration,
    body: Option<Json<ModerationRequest>>,
    status_message: &str,
) -> Response {
    let target = match Identity::new(user_id) {
        Ok(identity) => identity,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid user ID")),
            )
                .into_response()
        }
    };

    let cmd = ModerateUserCommand {
        caller,
        target,
        action,
        reason: body.and_then(|Json(b)| b.reason),
    };

    match handlers.moderate_user_handler.handle(cmd).await {
        Ok(result) => {
            let response = ModerationResponse {
                message: status_message.to_string(),
                log_id: result.entry.id().to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// GET /api/admin/swaps - Page through the full swap ledger
pub async fn list_swaps(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Query(params): Query<PageParams>,
) -> Response {
    let query = ListAllSwapsQuery {
        caller: caller.identity,
        skip: params.skip,
        limit: params.limit,
    };

    match handlers.list_swaps_handler.handle(query).await {
        Ok(swaps) => {
            let response = AdminSwapListResponse {
                items: swaps.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// POST /api/admin/swaps/:id/approve - Force-accept a pending swap
pub async fn approve_swap(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_swap(
        handlers,
        caller.identity,
        swap_id,
        SwapModeration::Approve,
        body,
        "Swap request approved successfully",
    )
    .await
}

/// POST /api/admin/swaps/:id/reject - Force-reject a pending swap
pub async fn reject_swap(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_swap(
        handlers,
        caller.identity,
        swap_id,
        SwapModeration::Reject,
        body,
        "Swap request rejected successfully",
    )
    .await
}

/// DELETE /api/admin/swaps/:id - Remove a swap outright
pub async fn delete_swap(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
    body: Option<Json<ModerationRequest>>,
) -> Response {
    moderate_swap(
        handlers,
        caller.identity,
        swap_id,
        SwapModeration::Delete,
        body,
        "Swap request deleted successfully",
    )
    .await
}

async fn moderate_swap(
    handlers: AdminHandlers,
    caller: Identity,
    swap_id: String,
    action: SwapModeration,
    body: Option<Json<ModerationRequest>>,
    status_message: &str,
) -> Response {
    let swap_id = match swap_id.parse::<SwapId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid swap ID")),
            )
                .into_response()
        }
    };

    let cmd = ModerateSwapCommand {
        caller,
        swap_id,
        action,
        reason: body.and_then(|Json(b)| b.reason),
    };

    match handlers.moderate_swap_handler.handle(cmd).await {
        Ok(result) => {
            let response = ModerationResponse {
                message: status_message.to_string(),
                log_id: result.entry.id().to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// POST /api/admin/broadcast - Publish an announcement to all members
pub async fn send_broadcast(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Json(req): Json<SendBroadcastRequest>,
) -> Response {
    let cmd = SendBroadcastCommand {
        caller: caller.identity,
        title: req.title,
        message: req.message,
    };

    match handlers.broadcast_handler.handle(cmd).await {
        Ok(result) => {
            let response: BroadcastResponse = result.broadcast.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

/// GET /api/admin/logs - Page through the audit trail
pub async fn get_logs(
    State(handlers): State<AdminHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Query(params): Query<PageParams>,
) -> Response {
    let query = GetAuditLogQuery {
        caller: caller.identity,
        skip: params.skip,
        limit: params.limit,
    };

    match handlers.audit_log_handler.handle(query).await {
        Ok(entries) => {
            let response = AdminLogListResponse {
                items: entries.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_admin_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_admin_error(error: AdminError) -> Response {
    match error {
        AdminError::NotAdmin => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Admin access required")),
        )
            .into_response(),
        AdminError::UserNotFound(identity) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("User", identity.as_str())),
        )
            .into_response(),
        AdminError::SwapNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Swap", &id.to_string())),
        )
            .into_response(),
        AdminError::InvalidState(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::invalid_state(msg)),
        )
            .into_response(),
        AdminError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        AdminError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_error_not_admin_maps_to_403() {
        let error = AdminError::not_admin();
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn admin_error_user_not_found_maps_to_404() {
        let error = AdminError::user_not_found(Identity::new("user_ghost").unwrap());
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn admin_error_swap_not_found_maps_to_404() {
        let error = AdminError::swap_not_found(SwapId::new());
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn admin_error_invalid_state_maps_to_409() {
        let error = AdminError::invalid_state("Swap is not pending (currently completed)");
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn admin_error_validation_failed_maps_to_400() {
        let error = AdminError::validation("title", "Empty field");
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn admin_error_infrastructure_maps_to_500() {
        let error = AdminError::infrastructure("connection reset");
        let response = handle_admin_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
