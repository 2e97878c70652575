//! # gatekey-core
//!
//! Core crate for Gatekey. Contains configuration schemas, domain events,
//! the event publisher trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Gatekey crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
