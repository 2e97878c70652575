//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gatekey_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype so `AppError` can cross the Axum response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let (status, error_code, message) = match error.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", error.message),
            ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "CONFLICT", error.message),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", error.message),
            ErrorKind::InvalidCredentials
            | ErrorKind::InvalidToken
            | ErrorKind::InvalidRefreshToken => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", error.message)
            }
            ErrorKind::PermissionDenied | ErrorKind::IdentityMismatch => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", error.message)
            }
            _ => {
                // Full detail stays server-side; callers get an opaque error.
                tracing::error!(error = %error, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
