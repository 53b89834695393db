//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireIdentity;
use crate::application::handlers::user::{
    DeleteAccountCommand, DeleteAccountHandler, GetUserHandler, GetUserQuery, ListUsersHandler,
    ListUsersQuery, RegisterUserCommand, RegisterUserHandler, UpdateProfileCommand,
    UpdateProfileHandler,
};
use crate::domain::foundation::Identity;
use crate::domain::user::{ProfileUpdate, UserError};

use super::dto::{
    ErrorResponse, ListUsersParams, RegisterUserRequest, UpdateProfileRequest, UserListResponse,
    UserResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    register_handler: Arc<RegisterUserHandler>,
    get_handler: Arc<GetUserHandler>,
    list_handler: Arc<ListUsersHandler>,
    update_handler: Arc<UpdateProfileHandler>,
    delete_handler: Arc<DeleteAccountHandler>,
}

impl UserHandlers {
    pub fn new(
        register_handler: Arc<RegisterUserHandler>,
        get_handler: Arc<GetUserHandler>,
        list_handler: Arc<ListUsersHandler>,
        update_handler: Arc<UpdateProfileHandler>,
        delete_handler: Arc<DeleteAccountHandler>,
    ) -> Self {
        Self {
            register_handler,
            get_handler,
            list_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/users - Register the caller's profile
pub async fn register_user(
    State(handlers): State<UserHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Json(req): Json<RegisterUserRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        identity: caller.identity,
        username: req.username,
        full_name: req.full_name,
        email: req.email,
        location: req.location,
        availability: req.availability,
        skills_offered: req.skills_offered,
        skills_wanted: req.skills_wanted,
        is_public: req.is_public,
    };

    match handlers.register_handler.handle(cmd).await {
        Ok(result) => {
            let response: UserResponse = result.user.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users - Browse visible profiles
pub async fn list_users(
    State(handlers): State<UserHandlers>,
    Query(params): Query<ListUsersParams>,
) -> Response {
    let query = ListUsersQuery {
        skip: params.skip,
        limit: params.limit,
    };

    match handlers.list_handler.handle(query).await {
        Ok(users) => {
            let response: UserListResponse = users.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/:id - Get one profile by identity
pub async fn get_user(
    State(handlers): State<UserHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let identity = match Identity::new(user_id) {
        Ok(identity) => identity,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid user ID")),
            )
                .into_response()
        }
    };

    match handlers.get_handler.handle(GetUserQuery { identity }).await {
        Ok(user) => {
            let response: UserResponse = user.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/users/:id - Update the caller's own profile
pub async fn update_profile(
    State(handlers): State<UserHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let subject = match Identity::new(user_id) {
        Ok(identity) => identity,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid user ID")),
            )
                .into_response()
        }
    };

    let cmd = UpdateProfileCommand {
        caller: caller.identity,
        subject,
        update: ProfileUpdate {
            username: req.username,
            full_name: req.full_name,
            location: req.location,
            availability: req.availability,
            skills_offered: req.skills_offered,
            skills_wanted: req.skills_wanted,
            is_public: req.is_public,
        },
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(result) => {
            let response: UserResponse = result.user.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// DELETE /api/users/:id - Delete the caller's own account
pub async fn delete_account(
    State(handlers): State<UserHandlers>,
    RequireIdentity(caller): RequireIdentity,
    Path(user_id): Path<String>,
) -> Response {
    let subject = match Identity::new(user_id) {
        Ok(identity) => identity,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid user ID")),
            )
                .into_response()
        }
    };

    let cmd = DeleteAccountCommand {
        caller: caller.identity,
        subject,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_user_error(error: UserError) -> Response {
    match error {
        UserError::NotFound(identity) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("User", identity.as_str())),
        )
            .into_response(),
        UserError::Duplicate(field) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "A user with this {} already exists",
                field
            ))),
        )
            .into_response(),
        UserError::Forbidden(msg) => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::forbidden(msg))).into_response()
        }
        UserError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        UserError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
