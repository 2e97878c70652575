//! PostgreSQL store implementations.

pub mod role;
pub mod user;
pub mod uow;

pub use role::PgRoleDirectory;
pub use user::PgUserStore;
pub use uow::{PgUnitOfWork, PgUnitOfWorkProvider};
