//! HTTP routes for admin endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    approve_swap, ban_user, delete_swap, delete_user, get_logs, get_stats, list_swaps, list_users,
    reject_swap, send_broadcast, suspend_user, verify_user, AdminHandlers,
};

/// Creates the admin router with all endpoints.
pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/users", get(list_users))
        .route("/users/:id/verify", post(verify_user))
        .route("/users/:id/suspend", post(suspend_user))
        .route("/users/:id/ban", post(ban_user))
        .route("/users/:id", delete(delete_user))
        .route("/swaps", get(list_swaps))
        .route("/swaps/:id/approve", post(approve_swap))
        .route("/swaps/:id/reject", post(reject_swap))
        .route("/swaps/:id", delete(delete_swap))
        .route("/broadcast", post(send_broadcast))
        .route("/logs", get(get_logs))
        .with_state(handlers)
}
