//! # gatekey-auth
//!
//! Token and credential primitives for Gatekey.
//!
//! ## Modules
//!
//! - `jwt` — signed session token encoding and verification
//! - `password` — Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenCodec, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
