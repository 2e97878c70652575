//! Access check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::AccessCheckRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/access/check
pub async fn check(
    State(state): State<AppState>,
    Json(req): Json<AccessCheckRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .access
        .check(&req.access_token, req.required_level)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Access granted".to_string(),
    })))
}
