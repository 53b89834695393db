//! HTTP handlers for swap endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireIdentity;
use crate::application::handlers::swap::{
    CancelSwapCommand, CancelSwapHandler, CompleteSwapCommand, CompleteSwapHandler,
    CreateSwapCommand, CreateSwapHandler, ListUserSwapsHandler, ListUserSwapsQuery,
    RespondToSwapCommand, RespondToSwapHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
    SwapDecision,
};
use crate::domain::foundation::{Identity, SwapId};
use crate::domain::swap::SwapError;

use super::dto::{
    CreateSwapRequest, ErrorResponse, SubmitFeedbackRequest, SwapListResponse, SwapResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SwapHandlers {
    create_handler: Arc<CreateSwapHandler>,
    respond_handler: Arc<RespondToSwapHandler>,
    cancel_handler: Arc<CancelSwapHandler>,
    complete_handler: Arc<CompleteSwapHandler>,
    feedback_handler: Arc<SubmitFeedbackHandler>,
    list_handler: Arc<ListUserSwapsHandler>,
}

impl SwapHandlers {
    pub fn new(
        create_handler: Arc<CreateSwapHandler>,
        respond_handler: Arc<RespondToSwapHandler>,
        cancel_handler: Arc<CancelSwapHandler>,
        complete_handler: Arc<CompleteSwapHandler>,
        feedback_handler: Arc<SubmitFeedbackHandler>,
        list_handler: Arc<ListUserSwapsHandler>,
    ) -> Self {
        Self {
            create_handler,
            respond_handler,
            cancel_handler,
            complete_handler,
            feedback_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/swaps - Open a swap request
pub async fn create_swap(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Json(req): Json<CreateSwapRequest>,
) -> Response {
    let receiver = match Identity::new(req.receiver_id) {
        Ok(identity) => identity,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid receiver ID")),
            )
                .into_response()
        }
    };

    let cmd = CreateSwapCommand {
        requester: caller.identity,
        receiver,
        message: req.message,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response: SwapResponse = result.swap.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// GET /api/swaps - List the caller's swap history
pub async fn list_swaps(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
) -> Response {
    let query = ListUserSwapsQuery {
        identity: caller.identity,
    };

    match handlers.list_handler.handle(query).await {
        Ok(result) => {
            let response = SwapListResponse {
                items: result.swaps.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// POST /api/swaps/:id/accept - Accept a pending request
pub async fn accept_swap(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
) -> Response {
    respond(handlers, caller.identity, swap_id, SwapDecision::Accept).await
}

/// POST /api/swaps/:id/reject - Reject a pending request
pub async fn reject_swap(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
) -> Response {
    respond(handlers, caller.identity, swap_id, SwapDecision::Reject).await
}

async fn respond(
    handlers: SwapHandlers,
    caller: Identity,
    swap_id: String,
    decision: SwapDecision,
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

    let cmd = RespondToSwapCommand {
        swap_id,
        caller,
        decision,
    };

    match handlers.respond_handler.handle(cmd).await {
        Ok(result) => {
            let response: SwapResponse = result.swap.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// POST /api/swaps/:id/cancel - Withdraw a pending request
pub async fn cancel_swap(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
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

    let cmd = CancelSwapCommand {
        swap_id,
        caller: caller.identity,
    };

    match handlers.cancel_handler.handle(cmd).await {
        Ok(result) => {
            let response: SwapResponse = result.swap.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// POST /api/swaps/:id/complete - Mark an accepted swap as carried out
pub async fn complete_swap(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
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

    let cmd = CompleteSwapCommand {
        swap_id,
        caller: caller.identity,
    };

    match handlers.complete_handler.handle(cmd).await {
        Ok(result) => {
            let response: SwapResponse = result.swap.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

/// POST /api/swaps/:id/feedback - Leave feedback and a rating
pub async fn submit_feedback(
    State(handlers): State<SwapHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(swap_id): Path<String>,
    Json(req): Json<SubmitFeedbackRequest>,
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

    let cmd = SubmitFeedbackCommand {
        swap_id,
        caller: caller.identity,
        feedback: req.feedback,
        rating: req.rating,
    };

    match handlers.feedback_handler.handle(cmd).await {
        Ok(result) => {
            let response: SwapResponse = result.swap.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_swap_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_swap_error(error: SwapError) -> Response {
    match error {
        SwapError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Swap", &id.to_string())),
        )
            .into_response(),
        SwapError::UserNotFound(identity) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("User", identity.as_str())),
        )
            .into_response(),
        SwapError::Forbidden(msg) => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::forbidden(msg))).into_response()
        }
        SwapError::InvalidState(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::invalid_state(msg)),
        )
            .into_response(),
        SwapError::DuplicateRequest => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "A pending swap request between these users already exists",
            )),
        )
            .into_response(),
        SwapError::FeedbackAlreadySubmitted => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(
                "Feedback was already submitted for this swap",
            )),
        )
            .into_response(),
        SwapError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        SwapError::Infrastructure(msg) => (
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
    fn swap_error_not_found_maps_to_404() {
        let error = SwapError::not_found(SwapId::new());
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn swap_error_forbidden_maps_to_403() {
        let error = SwapError::forbidden("Only the receiver can accept a swap request");
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn swap_error_invalid_state_maps_to_409() {
        let error = SwapError::invalid_state("Swap is not pending (currently accepted)");
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn swap_error_duplicate_maps_to_409() {
        let error = SwapError::duplicate_request();
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn swap_error_repeat_feedback_maps_to_409() {
        let error = SwapError::feedback_already_submitted();
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn swap_error_validation_failed_maps_to_400() {
        let error = SwapError::ValidationFailed {
            field: "message".to_string(),
            message: "Too long".to_string(),
        };
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn swap_error_infrastructure_maps_to_500() {
        let error = SwapError::infrastructure("connection reset");
        let response = handle_swap_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
