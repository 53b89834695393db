//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (`dto.rs`, `handlers.rs`,
//! `routes.rs`); this module assembles them into the application router
//! and owns the cross-cutting layers (identity, tracing, CORS).

pub mod admin;
pub mod middleware;
pub mod swap;
pub mod user;

pub use admin::{admin_routes, AdminHandlers};
pub use middleware::{identity_middleware, IdentityState, RequireIdentity};
pub use swap::{swap_routes, SwapHandlers};
pub use user::{user_routes, UserHandlers};

use http::{HeaderValue, Method};
use axum::{routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Assembles the full application router.
///
/// All `/api` routes run behind the identity middleware; the liveness
/// probes stay open so load balancers don't need a forwarded identity.
pub fn app_router(
    swap_handlers: SwapHandlers,
    user_handlers: UserHandlers,
    admin_handlers: AdminHandlers,
    identity: IdentityState,
    cors_origins: &[String],
) -> Router {
    let api = Router::new()
        .nest("/swaps", swap_routes(swap_handlers))
        .nest("/users", user_routes(user_handlers))
        .nest("/admin", admin_routes(admin_handlers))
        .layer(axum::middleware::from_fn_with_state(
            identity,
            identity_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer from configured origins.
///
/// An empty origin list means a development deployment where the
/// frontend origin isn't known yet, so CORS stays wide open.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// GET / - Service banner
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Skill Swap Platform API" }))
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
