//! Application state shared across all handlers.

use std::sync::Arc;

use gatekey_core::config::AppConfig;
use gatekey_database::DatabasePool;
use gatekey_service::{AccessEvaluator, IdentityService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity service.
    pub identity: Arc<IdentityService>,
    /// Access evaluator.
    pub access: Arc<AccessEvaluator>,
    /// User profile service.
    pub users: Arc<UserService>,
    /// Database pool, for health checks. `None` when running against the
    /// in-memory provider.
    pub db: Option<DatabasePool>,
}
