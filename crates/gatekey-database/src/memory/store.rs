//! In-memory user store and role directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;
use gatekey_entity::{NewUser, Role, User, UserUpdate};

use crate::store::{RoleDirectory, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    roles: Vec<Role>,
}

/// In-memory implementation of [`UserStore`] and [`RoleDirectory`].
///
/// Mutations go through [`crate::memory::MemoryUnitOfWork`], which buffers
/// them and applies them here at commit time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role and return it.
    pub fn seed_role(&self, name: &str, level: i32) -> Role {
        let role = Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            level,
        };
        self.write().roles.push(role.clone());
        role
    }

    /// Number of persisted user rows.
    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    /// Apply a buffered insert, enforcing email uniqueness.
    pub(crate) fn apply_insert(&self, user: User) -> AppResult<()> {
        let mut state = self.write();
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::already_exists("Email already in use"));
        }
        state.users.insert(user.id, user);
        Ok(())
    }

    /// Apply a buffered update. Missing users are a no-op; the unit of work
    /// already reported `None` to its caller.
    pub(crate) fn apply_update(&self, id: Uuid, update: &UserUpdate) -> AppResult<()> {
        let mut state = self.write();
        if let Some(email) = &update.email {
            if state
                .users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(AppError::already_exists("Email already in use"));
            }
        }
        if let Some(user) = state.users.get_mut(&id) {
            apply_fields(user, update);
        }
        Ok(())
    }

    /// Apply a buffered delete.
    pub(crate) fn apply_delete(&self, id: Uuid) {
        self.write().users.remove(&id);
    }

    pub(crate) fn email_taken(&self, email: &str) -> bool {
        self.read()
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub(crate) fn user_by_id(&self, id: Uuid) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    pub(crate) fn role_by_name(&self, name: &str) -> Option<Role> {
        self.read().roles.iter().find(|r| r.name == name).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Overlay update fields onto a user record.
pub(crate) fn apply_fields(user: &mut User, update: &UserUpdate) {
    if let Some(name) = &update.name {
        user.name = Some(name.clone());
    }
    if let Some(email) = &update.email {
        user.email = email.clone();
    }
    if let Some(hash) = &update.password_hash {
        user.password_hash = hash.clone();
    }
    if let Some(avatar) = &update.avatar_url {
        user.avatar_url = Some(avatar.clone());
    }
    if let Some(role_id) = update.role_id {
        user.role_id = role_id;
    }
    user.updated_at = Utc::now();
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.user_by_id(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl RoleDirectory for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.read().roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.role_by_name(name))
    }
}

/// Build a full user record from creation data.
pub(crate) fn materialize(user: &NewUser) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: user.name.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        avatar_url: user.avatar_url.clone(),
        role_id: user.role_id,
        created_at: now,
        updated_at: now,
    }
}
