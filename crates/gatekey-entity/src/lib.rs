//! # gatekey-entity
//!
//! Domain entities for Gatekey: users, roles, and the projections that
//! cross the service boundary.

pub mod role;
pub mod user;

pub use role::Role;
pub use user::{NewUser, User, UserProfile, UserUpdate};
