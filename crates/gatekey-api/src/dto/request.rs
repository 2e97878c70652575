//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Avatar URL (optional).
    pub avatar_url: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh / access-token issuance request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Subject confirmation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmSubjectRequest {
    /// Refresh token.
    pub refresh_token: String,
    /// The user the caller claims to be.
    pub user_id: Uuid,
}

/// Access check request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCheckRequest {
    /// Access token.
    pub access_token: String,
    /// Required trust level.
    pub required_level: i32,
}

/// User update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New role name.
    pub role: Option<String>,
}
