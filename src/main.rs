//! Service entry point: configuration, tracing, database pool, and the
//! axum server with graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use skill_swap::adapters::auth::HeaderIdentityVerifier;
use skill_swap::adapters::http::{
    app_router, AdminHandlers, IdentityState, SwapHandlers, UserHandlers,
};
use skill_swap::adapters::postgres::{
    PostgresAdminLogStore, PostgresBroadcastStore, PostgresSwapStore, PostgresUserDirectory,
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
use skill_swap::config::AppConfig;
use skill_swap::ports::{AdminLogStore, BroadcastStore, IdentityVerifier, SwapStore, UserDirectory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Store adapters
    let swaps: Arc<dyn SwapStore> = Arc::new(PostgresSwapStore::new(pool.clone()));
    let directory: Arc<dyn UserDirectory> = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let audit_log: Arc<dyn AdminLogStore> = Arc::new(PostgresAdminLogStore::new(pool.clone()));
    let broadcasts: Arc<dyn BroadcastStore> = Arc::new(PostgresBroadcastStore::new(pool));

    // Identity verification for the forwarded header
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(HeaderIdentityVerifier::new());
    let identity = IdentityState::new(verifier, config.auth.identity_header.clone());

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

    let app = app_router(
        swap_handlers,
        user_handlers,
        admin_handlers,
        identity,
        &config.server.cors_origins_list(),
    )
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr = config.server.bind_addr()?;
    tracing::info!(%addr, "Skill swap backend listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
