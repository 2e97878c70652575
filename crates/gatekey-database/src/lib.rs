//! # gatekey-database
//!
//! Store contracts and their implementations for Gatekey.
//!
//! The credential store, role directory, and unit-of-work coordinator are
//! defined as traits so services can run against either the PostgreSQL
//! implementations (`repositories`) or the in-memory provider (`memory`)
//! used by tests and development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod uow;

pub use connection::DatabasePool;
pub use store::{RoleDirectory, UserStore};
pub use uow::{IsolationLevel, UnitOfWork, UnitOfWorkProvider};
