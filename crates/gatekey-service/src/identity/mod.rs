//! Identity operations: registration, login, and token rotation.

pub mod service;

pub use service::{IdentityService, NewProfile};
