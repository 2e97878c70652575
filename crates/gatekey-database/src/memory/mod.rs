//! In-memory store provider.
//!
//! First-class implementations of the store contracts backed by process
//! memory, used by tests and local development so services run without a
//! PostgreSQL instance.

pub mod store;
pub mod uow;

pub use store::MemoryStore;
pub use uow::{MemoryUnitOfWork, MemoryUnitOfWorkProvider};
