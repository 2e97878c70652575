//! PostgreSQL unit-of-work implementation over `sqlx::Transaction`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use gatekey_core::error::{AppError, ErrorKind};
use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_core::traits::EventPublisher;
use gatekey_entity::{NewUser, Role, User, UserUpdate};

use crate::uow::{IsolationLevel, UnitOfWork, UnitOfWorkProvider};

/// Begins PostgreSQL-backed units of work.
#[derive(Clone)]
pub struct PgUnitOfWorkProvider {
    pool: PgPool,
    publisher: Arc<dyn EventPublisher>,
}

impl PgUnitOfWorkProvider {
    /// Create a new provider over the given pool and event publisher.
    pub fn new(pool: PgPool, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { pool, publisher }
    }
}

#[async_trait]
impl UnitOfWorkProvider for PgUnitOfWorkProvider {
    async fn begin(&self, isolation: IsolationLevel) -> AppResult<Box<dyn UnitOfWork>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(&format!(
            "SET TRANSACTION ISOLATION LEVEL {}",
            isolation.as_sql()
        ))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set isolation level", e)
        })?;

        Ok(Box::new(PgUnitOfWork {
            tx,
            publisher: Arc::clone(&self.publisher),
            staged: Vec::new(),
        }))
    }
}

/// One open PostgreSQL transaction plus its staged events.
///
/// Dropping the handle without resolving it rolls the transaction back
/// (sqlx transaction drop semantics) and discards the staged events.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
    publisher: Arc<dyn EventPublisher>,
    staged: Vec<DomainEvent>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn insert_user(&mut self, user: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, avatar_url, role_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(user.role_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_user_write_error)
    }

    async fn update_user(&mut self, id: Uuid, update: &UserUpdate) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              email = COALESCE($3, email), \
                              password_hash = COALESCE($4, password_hash), \
                              avatar_url = COALESCE($5, avatar_url), \
                              role_id = COALESCE($6, role_id), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(&update.avatar_url)
        .bind(update.role_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_user_write_error)
    }

    async fn delete_user(&mut self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn role_by_name(&mut self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }

    fn stage_event(&mut self, event: DomainEvent) {
        self.staged.push(event);
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        // Publish before committing so a publish failure rolls the store
        // mutations back. The drop of `self.tx` on the error path is the
        // rollback. The reverse window (published, commit fails) is the
        // documented dual-write residual; closing it requires an outbox.
        for event in &self.staged {
            self.publisher.publish(event).await?;
        }

        debug!(staged_events = self.staged.len(), "Committing unit of work");

        self.tx
            .commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit", e))
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to roll back", e))
    }
}

/// Map a user write error, translating the unique email constraint into
/// `AlreadyExists`.
fn map_user_write_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
            AppError::already_exists("Email already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write user", e),
    }
}
