//! User profile operations — read, update, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gatekey_auth::password::{PasswordHasher, PasswordValidator};
use gatekey_core::error::AppError;
use gatekey_core::events::{DomainEvent, EventPayload, UserEvent};
use gatekey_core::result::AppResult;
use gatekey_database::store::{RoleDirectory, UserStore};
use gatekey_database::uow::{IsolationLevel, UnitOfWork, UnitOfWorkProvider};
use gatekey_entity::{UserProfile, UserUpdate};

/// Requested changes to a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UserUpdateRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New plaintext password (re-hashed before storage).
    pub password: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New role name (resolved inside the unit of work).
    pub role: Option<String>,
}

/// Handles user profile operations.
#[derive(Clone)]
pub struct UserService {
    /// Read access to user records.
    store: Arc<dyn UserStore>,
    /// Read access to the role directory.
    roles: Arc<dyn RoleDirectory>,
    /// Unit-of-work provider for writes.
    uow: Arc<dyn UnitOfWorkProvider>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        store: Arc<dyn UserStore>,
        roles: Arc<dyn RoleDirectory>,
        uow: Arc<dyn UnitOfWorkProvider>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            store,
            roles,
            uow,
            hasher,
            validator,
        }
    }

    /// Gets a user's profile with the role name resolved.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserProfile> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let role = self
            .roles
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AppError::internal("User references a missing role"))?;

        Ok(UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
            role: role.name,
        })
    }

    /// Updates a user's profile fields.
    ///
    /// A role change resolves the role name inside the same unit of work
    /// as the user update; an unknown role name fails the whole operation.
    pub async fn update(&self, id: Uuid, request: UserUpdateRequest) -> AppResult<()> {
        let mut uow = self.uow.begin(IsolationLevel::ReadCommitted).await?;

        let role_id = match &request.role {
            Some(role_name) => Some(
                uow.role_by_name(role_name)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Role '{role_name}' not found")))?
                    .id,
            ),
            None => None,
        };

        let password_hash = match &request.password {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        uow.update_user(
            id,
            &UserUpdate {
                name: request.name,
                email: request.email,
                password_hash,
                avatar_url: request.avatar_url,
                role_id,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        uow.stage_event(DomainEvent::new(EventPayload::User(UserEvent::Updated {
            user_id: id,
        })));

        uow.commit().await?;

        info!(user_id = %id, "User updated");
        Ok(())
    }

    /// Deletes a user.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut uow = self.uow.begin(IsolationLevel::ReadCommitted).await?;

        if !uow.delete_user(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        uow.stage_event(DomainEvent::new(EventPayload::User(UserEvent::Deleted {
            user_id: id,
        })));

        uow.commit().await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
