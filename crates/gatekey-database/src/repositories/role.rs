//! PostgreSQL role directory implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use gatekey_core::error::{AppError, ErrorKind};
use gatekey_core::result::AppResult;
use gatekey_entity::Role;

use crate::store::RoleDirectory;

/// Role lookups over PostgreSQL.
///
/// Both lookups read the same `roles` table, so resolution by id and by
/// name always agree.
#[derive(Debug, Clone)]
pub struct PgRoleDirectory {
    pool: PgPool,
}

impl PgRoleDirectory {
    /// Create a new role directory over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for PgRoleDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role by id", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role by name", e)
            })
    }
}
