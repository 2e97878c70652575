//! Auth handlers — register, login, refresh, access-token, confirm.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use gatekey_core::error::AppError;
use gatekey_service::identity::NewProfile;

use crate::dto::request::{ConfirmSubjectRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{
    AccessTokenResponse, ApiResponse, MessageResponse, RefreshTokenResponse, RegisterResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user_id = state
        .identity
        .register(
            NewProfile {
                name: req.name,
                email: req.email,
                avatar_url: req.avatar_url,
            },
            &req.password,
        )
        .await?;

    Ok(Json(ApiResponse::ok(RegisterResponse { user_id })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<RefreshTokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let refresh_token = state.identity.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(RefreshTokenResponse { refresh_token })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshTokenResponse>>, ApiError> {
    let refresh_token = state.identity.refresh_session(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(RefreshTokenResponse { refresh_token })))
}

/// POST /api/auth/access-token
pub async fn access_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ApiError> {
    let access_token = state
        .identity
        .issue_access_token(&req.refresh_token)
        .await?;

    Ok(Json(ApiResponse::ok(AccessTokenResponse { access_token })))
}

/// POST /api/auth/confirm
pub async fn confirm_subject(
    State(state): State<AppState>,
    Json(req): Json<ConfirmSubjectRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .identity
        .confirm_subject(&req.refresh_token, req.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Subject confirmed".to_string(),
    })))
}
