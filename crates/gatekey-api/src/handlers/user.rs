//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use gatekey_core::error::AppError;

use gatekey_entity::UserProfile;
use gatekey_service::user::UserUpdateRequest;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.users.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .users
        .update(
            id,
            UserUpdateRequest {
                name: req.name,
                email: req.email,
                password: req.password,
                avatar_url: req.avatar_url,
                role: req.role,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
