//! Identity middleware and extractors for axum.
//!
//! This module provides:
//! - `identity_middleware` - Layer that verifies the forwarded identity header
//! - `RequireIdentity` - Extractor that requires a verified caller
//!
//! # Architecture
//!
//! The middleware uses the `IdentityVerifier` port, keeping it provider-agnostic.
//! Whether the identity is forwarded by a gateway or faked by a mock for
//! testing, the middleware doesn't change.
//!
//! ```text
//! Request → identity_middleware → injects Caller into extensions
//!                                      ↓
//!                              Handler → RequireIdentity extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//! use std::sync::Arc;
//!
//! let verifier: Arc<dyn IdentityVerifier> = Arc::new(MockIdentityVerifier::new());
//! let state = IdentityState::new(verifier, "x-user-id");
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(middleware::from_fn_with_state(state, identity_middleware));
//!
//! async fn protected_handler(RequireIdentity(caller): RequireIdentity) -> String {
//!     format!("Hello, {}!", caller.identity)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, Caller};
use crate::ports::IdentityVerifier;

/// Identity middleware state - the verifier port plus the header it reads.
#[derive(Clone)]
pub struct IdentityState {
    verifier: Arc<dyn IdentityVerifier>,
    header: Arc<str>,
}

impl IdentityState {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, header: impl Into<Arc<str>>) -> Self {
        Self {
            verifier,
            header: header.into(),
        }
    }
}

/// Identity middleware that verifies the forwarded identity header.
///
/// This middleware:
/// 1. Reads the configured identity header from the request
/// 2. Verifies the value using the `IdentityVerifier` port
/// 3. On success, injects `Caller` into request extensions
/// 4. On a missing header, continues without injecting (public routes stay open)
/// 5. On a rejected value, returns 401 Unauthorized
///
/// The header name comes from configuration; the upstream gateway strips any
/// client-supplied copy before forwarding, so a present header is trusted to
/// have been set by the gateway.
pub async fn identity_middleware(
    State(state): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let raw = request
        .headers()
        .get(state.header.as_ref())
        .and_then(|h| h.to_str().ok())
        .map(|h| h.to_string());

    match raw {
        Some(raw) => {
            // Verify the forwarded value
            match state.verifier.verify(&raw).await {
                Ok(identity) => {
                    // Inject the verified caller into request extensions
                    request.extensions_mut().insert(Caller::new(identity));
                    next.run(request).await
                }
                Err(e) => auth_failure_response(e),
            }
        }
        None => {
            // No identity forwarded - continue without a caller
            // Handlers can use RequireIdentity to enforce authentication
            next.run(request).await
        }
    }
}

/// Maps verification failures onto HTTP responses.
fn auth_failure_response(error: AuthError) -> Response {
    let (status, message) = match &error {
        AuthError::MissingIdentity => (StatusCode::UNAUTHORIZED, "Identity header is empty"),
        AuthError::InvalidIdentity(_) => (StatusCode::UNAUTHORIZED, "Invalid identity"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Identity provider unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Identity provider unavailable",
            )
        }
    };

    (
        status,
        Json(serde_json::json!({
            "error": message,
            "code": "AUTH_ERROR"
        })),
    )
        .into_response()
}

/// Extractor that requires a verified caller.
///
/// Use this extractor in handlers that require an authenticated caller.
/// If no caller is in the request extensions (i.e., the middleware didn't
/// successfully verify an identity header), returns 401 Unauthorized.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireIdentity(caller): RequireIdentity) -> impl IntoResponse {
///     format!("Hello, {}!", caller.identity)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Caller);

impl<S> axum::extract::FromRequestParts<S> for RequireIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Caller>()
                .cloned()
                .map(RequireIdentity)
                .ok_or(IdentityRejection::Unauthenticated)
        })
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone)]
pub enum IdentityRejection {
    /// No verified identity was forwarded with the request.
    Unauthenticated,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            IdentityRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}
