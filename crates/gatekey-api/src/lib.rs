//! # gatekey-api
//!
//! HTTP API layer for Gatekey built on Axum.
//!
//! Provides the REST endpoints, DTOs, and error mapping. The wire framing
//! is boundary work: handlers validate input, call into the services, and
//! translate `AppError` kinds into protocol status codes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
