//! Read-side store contracts.
//!
//! Mutations never go through these traits; all writes happen inside a
//! [`crate::uow::UnitOfWork`].

use async_trait::async_trait;
use uuid::Uuid;

use gatekey_core::result::AppResult;
use gatekey_entity::{Role, User};

/// Read access to persisted user records.
///
/// The password hash stays inside the returned [`User`] and never
/// serializes past the service boundary.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Read access to the role directory.
///
/// Lookups by id and by name resolve against the same data and must agree.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Find a role by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Find a role by its unique name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;
}
