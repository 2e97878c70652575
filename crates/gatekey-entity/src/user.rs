//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the Gatekey system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Human-readable display name.
    pub name: Option<String>,
    /// Email address (unique).
    pub email: String,
    /// Argon2 password hash. Never serialized out of the store boundary.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Assigned role.
    pub role_id: Uuid,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Avatar URL (optional).
    pub avatar_url: Option<String>,
    /// Assigned role.
    pub role_id: Uuid,
}

/// Data for updating an existing user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New role.
    pub role_id: Option<Uuid>,
}

/// The user projection that leaves the service layer.
///
/// Carries the resolved role name instead of the internal role id and
/// never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Resolved role name.
    pub role: String,
}
