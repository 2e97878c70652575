//! # gatekey-service
//!
//! Business logic services for Gatekey — orchestrates the credential
//! store, role directory, unit of work, token codecs, and password
//! hashing.
//!
//! ## Modules
//!
//! - `identity` — registration, login, token rotation, subject confirmation
//! - `access` — access-token verification and trust-level checks
//! - `user` — user profile read/update/delete

pub mod access;
pub mod identity;
pub mod user;

pub use access::AccessEvaluator;
pub use identity::IdentityService;
pub use user::UserService;
