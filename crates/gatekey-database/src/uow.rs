//! Unit-of-work contract: atomic store mutations plus staged events.

use async_trait::async_trait;
use uuid::Uuid;

use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_entity::{NewUser, Role, User, UserUpdate};

/// Transaction isolation level for a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// Statements see only data committed before each statement began.
    ReadCommitted,
    /// All statements see the snapshot taken at transaction start.
    RepeatableRead,
    /// Full serializable isolation.
    Serializable,
}

impl IsolationLevel {
    /// The SQL isolation level clause for this variant.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

/// A single atomic unit of store mutations and staged domain events.
///
/// Lifecycle: begun by a [`UnitOfWorkProvider`], then resolved exactly once
/// by `commit` or `rollback`. Both consume the handle, so no operation can
/// be issued after resolution. Dropping an unresolved handle rolls back and
/// discards staged events.
///
/// `commit` publishes staged events before committing the store mutations:
/// a publish failure rolls the whole operation back. The converse window
/// (events published, commit fails) remains open; closing it needs a
/// durable outbox, which is out of scope here.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Insert a new user. Duplicate email fails with `AlreadyExists`.
    async fn insert_user(&mut self, user: &NewUser) -> AppResult<User>;

    /// Update a user's fields. Returns `None` when the user does not exist.
    async fn update_user(&mut self, id: Uuid, update: &UserUpdate) -> AppResult<Option<User>>;

    /// Delete a user. Returns `true` when a row was removed.
    async fn delete_user(&mut self, id: Uuid) -> AppResult<bool>;

    /// Resolve a role by name within this transaction.
    async fn role_by_name(&mut self, name: &str) -> AppResult<Option<Role>>;

    /// Stage a domain event for publication at commit time.
    fn stage_event(&mut self, event: DomainEvent);

    /// Publish staged events, then commit the store mutations.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard all mutations and staged events.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Begins units of work at a chosen isolation level.
#[async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    /// Begin a new unit of work.
    async fn begin(&self, isolation: IsolationLevel) -> AppResult<Box<dyn UnitOfWork>>;
}
