//! In-memory unit-of-work implementation.
//!
//! Mutations are buffered on the handle and applied to the shared
//! [`MemoryStore`] only at commit time, mirroring the transactional
//! semantics of the PostgreSQL implementation: a dropped or rolled-back
//! handle leaves the store untouched, and a publish failure at commit
//! discards the buffered mutations.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_core::traits::EventPublisher;
use gatekey_entity::{NewUser, Role, User, UserUpdate};

use super::store::{MemoryStore, apply_fields, materialize};
use crate::uow::{IsolationLevel, UnitOfWork, UnitOfWorkProvider};

/// Begins in-memory units of work.
#[derive(Clone)]
pub struct MemoryUnitOfWorkProvider {
    store: Arc<MemoryStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl MemoryUnitOfWorkProvider {
    /// Create a new provider over the given store and publisher.
    pub fn new(store: Arc<MemoryStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }
}

#[async_trait]
impl UnitOfWorkProvider for MemoryUnitOfWorkProvider {
    async fn begin(&self, _isolation: IsolationLevel) -> AppResult<Box<dyn UnitOfWork>> {
        // A single process-wide map has no isolation levels to choose from;
        // the requested level is accepted and the strongest one provided.
        Ok(Box::new(MemoryUnitOfWork {
            store: Arc::clone(&self.store),
            publisher: Arc::clone(&self.publisher),
            staged: Vec::new(),
            ops: Vec::new(),
        }))
    }
}

enum PendingOp {
    Insert(User),
    Update(Uuid, UserUpdate),
    Delete(Uuid),
}

/// One buffered in-memory unit of work.
pub struct MemoryUnitOfWork {
    store: Arc<MemoryStore>,
    publisher: Arc<dyn EventPublisher>,
    staged: Vec<DomainEvent>,
    ops: Vec<PendingOp>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn insert_user(&mut self, user: &NewUser) -> AppResult<User> {
        let duplicate = self.store.email_taken(&user.email)
            || self.ops.iter().any(|op| {
                matches!(op, PendingOp::Insert(u) if u.email.eq_ignore_ascii_case(&user.email))
            });
        if duplicate {
            return Err(gatekey_core::AppError::already_exists(
                "Email already in use",
            ));
        }

        let record = materialize(user);
        self.ops.push(PendingOp::Insert(record.clone()));
        Ok(record)
    }

    async fn update_user(&mut self, id: Uuid, update: &UserUpdate) -> AppResult<Option<User>> {
        let Some(mut user) = self.store.user_by_id(id) else {
            return Ok(None);
        };

        apply_fields(&mut user, update);
        self.ops.push(PendingOp::Update(id, update.clone()));
        Ok(Some(user))
    }

    async fn delete_user(&mut self, id: Uuid) -> AppResult<bool> {
        if self.store.user_by_id(id).is_none() {
            return Ok(false);
        }
        self.ops.push(PendingOp::Delete(id));
        Ok(true)
    }

    async fn role_by_name(&mut self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.store.role_by_name(name))
    }

    fn stage_event(&mut self, event: DomainEvent) {
        self.staged.push(event);
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        // Publish first: a failure here leaves the store untouched, the
        // same ordering the PostgreSQL implementation uses.
        for event in &self.staged {
            self.publisher.publish(event).await?;
        }

        for op in self.ops {
            match op {
                PendingOp::Insert(user) => self.store.apply_insert(user)?,
                PendingOp::Update(id, update) => self.store.apply_update(id, &update)?,
                PendingOp::Delete(id) => self.store.apply_delete(id),
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        // Buffered ops and staged events drop with the handle.
        Ok(())
    }
}
