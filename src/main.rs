//! Gatekey Server — Identity and Access Service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gatekey_auth::password::hasher::PasswordHasher;
use gatekey_auth::password::validator::PasswordValidator;
use gatekey_broker::provider::BrokerManager;
use gatekey_core::config::AppConfig;
use gatekey_core::error::AppError;
use gatekey_database::connection::DatabasePool;
use gatekey_database::repositories::role::PgRoleDirectory;
use gatekey_database::repositories::uow::PgUnitOfWorkProvider;
use gatekey_database::repositories::user::PgUserStore;
use gatekey_service::{AccessEvaluator, IdentityService, UserService};

#[tokio::main]
async fn main() {
    let env = std::env::var("GATEKEY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Gatekey v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    gatekey_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize broker ────────────────────────────────
    tracing::info!("Initializing broker (provider: {})...", config.broker.provider);
    let broker = BrokerManager::new(&config.broker).await?;
    tracing::info!("Broker initialized");

    // ── Step 3: Initialize stores ────────────────────────────────
    let store = Arc::new(PgUserStore::new(db.pool().clone()));
    let roles = Arc::new(PgRoleDirectory::new(db.pool().clone()));
    let uow = Arc::new(PgUnitOfWorkProvider::new(
        db.pool().clone(),
        broker.publisher(),
    ));

    // ── Step 4: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));

    let identity = Arc::new(IdentityService::new(
        &config.auth,
        store.clone(),
        roles.clone(),
        uow.clone(),
        Arc::clone(&hasher),
    ));
    let access = Arc::new(AccessEvaluator::new(&config.auth, roles.clone()));
    let users = Arc::new(UserService::new(
        store,
        roles,
        uow,
        hasher,
        validator,
    ));
    tracing::info!("Services initialized");

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = gatekey_api::state::AppState {
        config: Arc::new(config.clone()),
        identity,
        access,
        users,
        db: Some(db.clone()),
    };

    let app = gatekey_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Gatekey server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;

    tracing::info!("Gatekey server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
