//! Integration tests for the HTTP surface.
//!
//! These tests assemble the full router over the in-memory adapters and
//! drive it with `tower::ServiceExt::oneshot`, checking routing, the
//! identity middleware, and the error-to-status mapping end to end.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use skill_swap::adapters::auth::HeaderIdentityVerifier;
use skill_swap::adapters::http::{
    app_router, AdminHandlers, IdentityState, SwapHandlers, UserHandlers,
};
use skill_swap::adapters::memory::{
    InMemoryAdminLogStore, InMemoryBroadcastStore, InMemorySwapStore, InMemoryUserDirectory,
};
use skill_swap::application::handlers::admin::{
    GetAuditLogHandler, GetPlatformStatsHandler, ListAllSwapsHandler, ListAllUsersHandler,
    ModerateSwapHandler, ModerateUserHandler, SendBroadcastHandler,
};
use skill_swap::application::handlers::swap::{
    CancelSwapHandler, CompleteSwapHandler, CreateSwapHandler, ListUserSwapsHandler,
    RespondToSwapHandler, SubmitFeedbackHandler,
};
use skill_swap::application::handlers::user::{
    DeleteAccountHandler, GetUserHandler, ListUsersHandler, RegisterUserHandler,
    UpdateProfileHandler,
};
use skill_swap::domain::foundation::{Identity, Timestamp};
use skill_swap::domain::user::{User, UserRole};
use skill_swap::ports::{
    AdminLogStore, BroadcastStore, IdentityVerifier, SwapStore, UserDirectory,
};

// =============================================================================
// Test infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    directory: Arc<InMemoryUserDirectory>,
}

fn build_app() -> TestApp {
    let memory_swaps = Arc::new(InMemorySwapStore::new());
    let memory_directory = Arc::new(InMemoryUserDirectory::new());
    let swaps: Arc<dyn SwapStore> = memory_swaps;
    let directory: Arc<dyn UserDirectory> = memory_directory.clone();
    let audit_log: Arc<dyn AdminLogStore> = Arc::new(InMemoryAdminLogStore::new());
    let broadcasts: Arc<dyn BroadcastStore> = Arc::new(InMemoryBroadcastStore::new());

    let verifier: Arc<dyn IdentityVerifier> = Arc::new(HeaderIdentityVerifier::new());
    let identity = IdentityState::new(verifier, "x-user-id");

    let swap_handlers = SwapHandlers::new(
        Arc::new(CreateSwapHandler::new(swaps.clone(), directory.clone())),
        Arc::new(RespondToSwapHandler::new(swaps.clone())),
        Arc::new(CancelSwapHandler::new(swaps.clone())),
        Arc::new(CompleteSwapHandler::new(swaps.clone())),
        Arc::new(SubmitFeedbackHandler::new(swaps.clone(), directory.clone())),
        Arc::new(ListUserSwapsHandler::new(swaps.clone(), directory.clone())),
    );

    let user_handlers = UserHandlers::new(
        Arc::new(RegisterUserHandler::new(directory.clone())),
        Arc::new(GetUserHandler::new(directory.clone())),
        Arc::new(ListUsersHandler::new(directory.clone())),
        Arc::new(UpdateProfileHandler::new(directory.clone())),
        Arc::new(DeleteAccountHandler::new(directory.clone())),
    );

    let admin_handlers = AdminHandlers::new(
        Arc::new(ListAllUsersHandler::new(directory.clone())),
        Arc::new(ListAllSwapsHandler::new(swaps.clone(), directory.clone())),
        Arc::new(ModerateUserHandler::new(
            directory.clone(),
            audit_log.clone(),
        )),
        Arc::new(ModerateSwapHandler::new(
            swaps.clone(),
            directory.clone(),
            audit_log.clone(),
        )),
        Arc::new(SendBroadcastHandler::new(directory.clone(), broadcasts)),
        Arc::new(GetAuditLogHandler::new(directory.clone(), audit_log)),
        Arc::new(GetPlatformStatsHandler::new(swaps, directory)),
    );

    TestApp {
        router: app_router(swap_handlers, user_handlers, admin_handlers, identity, &[]),
        directory: memory_directory,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(uri: &str, caller: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", caller)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, caller: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-user-id", caller)
        .body(Body::empty())
        .unwrap()
}

async fn register(router: &Router, caller: &str, username: &str, name: &str) {
    let (status, _) = send(
        router,
        post(
            "/api/users",
            caller,
            json!({
                "username": username,
                "full_name": name,
                "email": format!("{}@example.com", username),
                "skills_offered": ["guitar"],
                "skills_wanted": ["spanish"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// Creates a pending swap and returns its id.
async fn open_swap(router: &Router, requester: &str, receiver: &str) -> String {
    let (status, body) = send(
        router,
        post(
            "/api/swaps",
            requester,
            json!({ "receiver_id": receiver, "message": "hi" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn seed_admin(directory: &InMemoryUserDirectory, id: &str) {
    let now = Timestamp::now();
    let admin = User::reconstitute(
        Identity::new(id).unwrap(),
        "root".to_string(),
        "Site Admin".to_string(),
        format!("{}@example.com", id),
        None,
        None,
        vec![],
        vec![],
        false,
        false,
        None,
        true,
        UserRole::Admin,
        None,
        vec![],
        now,
        now,
    );
    directory.insert(&admin).await.unwrap();
}

// =============================================================================
// Liveness and identity middleware
// =============================================================================

#[tokio::test]
async fn health_endpoints_are_open() {
    let app = build_app();

    let (status, body) = send(
        &app.router,
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(
        &app.router,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn api_routes_require_a_forwarded_identity() {
    let app = build_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/swaps")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn a_blank_identity_header_is_rejected() {
    let app = build_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/swaps")
        .header("x-user-id", "   ")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Swap endpoints
// =============================================================================

#[tokio::test]
async fn swap_lifecycle_over_http() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;
    register(&app.router, "user_bob", "bob", "Bob Okafor").await;

    let swap_id = open_swap(&app.router, "user_alice", "user_bob").await;

    // Receiver accepts.
    let uri = format!("/api/swaps/{}/accept", swap_id);
    let (status, body) = send(&app.router, post(&uri, "user_bob", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    // Requester leaves feedback.
    let uri = format!("/api/swaps/{}/feedback", swap_id);
    let (status, body) = send(
        &app.router,
        post(&uri, "user_alice", json!({ "feedback": "great", "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requester_rating"], 5);
    assert!(body.get("receiver_rating").is_none());

    // The receiver's profile shows the new scalar rating.
    let (status, body) = send(&app.router, get("/api/users/user_bob", "user_alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 5.0);

    // History shows the swap with the counterpart's name.
    let (status, body) = send(&app.router, get("/api/swaps", "user_alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["receiver_name"], "Bob Okafor");
}

#[tokio::test]
async fn duplicate_swap_request_maps_to_409() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;
    register(&app.router, "user_bob", "bob", "Bob Okafor").await;
    open_swap(&app.router, "user_alice", "user_bob").await;

    let (status, body) = send(
        &app.router,
        post("/api/swaps", "user_alice", json!({ "receiver_id": "user_bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn accepting_someone_elses_swap_maps_to_403() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;
    register(&app.router, "user_bob", "bob", "Bob Okafor").await;
    register(&app.router, "user_carol", "carol", "Carol Reyes").await;
    let swap_id = open_swap(&app.router, "user_alice", "user_bob").await;

    let uri = format!("/api/swaps/{}/accept", swap_id);
    let (status, body) = send(&app.router, post(&uri, "user_carol", json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn out_of_range_rating_maps_to_400() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;
    register(&app.router, "user_bob", "bob", "Bob Okafor").await;
    let swap_id = open_swap(&app.router, "user_alice", "user_bob").await;
    let uri = format!("/api/swaps/{}/accept", swap_id);
    send(&app.router, post(&uri, "user_bob", json!({}))).await;

    let uri = format!("/api/swaps/{}/feedback", swap_id);
    let (status, body) = send(
        &app.router,
        post(&uri, "user_alice", json!({ "feedback": "x", "rating": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_swap_id_maps_to_404_and_garbage_to_400() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;

    let uri = format!("/api/swaps/{}/accept", uuid::Uuid::new_v4());
    let (status, _) = send(&app.router, post(&uri, "user_alice", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.router,
        post("/api/swaps/not-a-uuid/accept", "user_alice", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Admin endpoints
// =============================================================================

#[tokio::test]
async fn admin_surface_is_role_guarded() {
    let app = build_app();
    register(&app.router, "user_alice", "alice", "Alice Chen").await;

    let (status, _) = send(&app.router, get("/api/admin/stats", "user_alice")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_can_ban_and_read_the_audit_log() {
    let app = build_app();
    seed_admin(&app.directory, "user_root").await;
    register(&app.router, "user_mallory", "mallory", "Mallory Vane").await;

    let (status, body) = send(
        &app.router,
        post(
            "/api/admin/users/user_mallory/ban",
            "user_root",
            json!({ "reason": "spam" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User banned successfully");
    assert!(body["log_id"].as_str().is_some());

    let (status, body) = send(&app.router, get("/api/admin/logs", "user_root")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["target_id"], "user_mallory");
    assert_eq!(items[0]["reason"], "spam");
}

#[tokio::test]
async fn stats_reflect_registrations_and_swaps() {
    let app = build_app();
    seed_admin(&app.directory, "user_root").await;
    register(&app.router, "user_alice", "alice", "Alice Chen").await;
    register(&app.router, "user_bob", "bob", "Bob Okafor").await;
    open_swap(&app.router, "user_alice", "user_bob").await;

    let (status, body) = send(&app.router, get("/api/admin/stats", "user_root")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 3);
    assert_eq!(body["total_swaps"], 1);
    assert_eq!(body["pending_swaps"], 1);
}
