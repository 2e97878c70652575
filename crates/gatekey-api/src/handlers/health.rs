//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db {
        Some(pool) => match pool.ping().await {
            Ok(()) => "connected".to_string(),
            Err(_) => "error".to_string(),
        },
        None => "skipped".to_string(),
    };

    let status = if database == "error" { "degraded" } else { "ok" };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    }))
}
