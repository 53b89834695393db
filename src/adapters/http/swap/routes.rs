//! HTTP routes for swap endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    accept_swap, cancel_swap, complete_swap, create_swap, list_swaps, reject_swap,
    submit_feedback, SwapHandlers,
};

/// Creates the swap router with all endpoints.
pub fn swap_routes(handlers: SwapHandlers) -> Router {
    Router::new()
        .route("/", post(create_swap))
        .route("/", get(list_swaps))
        .route("/:id/accept", post(accept_swap))
        .route("/:id/reject", post(reject_swap))
        .route("/:id/cancel", post(cancel_swap))
        .route("/:id/complete", post(complete_swap))
        .route("/:id/feedback", post(submit_feedback))
        .with_state(handlers)
}
