//! Credential hashing with Argon2id.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;

/// Derives and checks Argon2id password hashes.
///
/// The algorithm, version, and cost parameters are pinned here rather
/// than inherited from crate defaults, so stored hashes stay comparable
/// across dependency upgrades. Verification runs the full derivation and
/// compares in constant time; a mismatch is `Ok(false)`, not an error.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    fn context() -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT)
    }

    /// Derive a PHC-formatted hash for a plaintext password, salted fresh.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Self::context()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Unable to derive password hash: {e}")))
    }

    /// Check a plaintext password against a stored PHC hash string.
    pub fn verify_password(&self, password: &str, stored: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            AppError::internal(format!("Stored hash is not a valid PHC string: {e}"))
        })?;

        match Self::context().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Hash comparison failed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse battery staple").unwrap();

        assert!(
            hasher
                .verify_password("correct horse battery staple", &hash)
                .unwrap()
        );
        assert!(!hasher.verify_password("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn test_distinct_salts() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("same password").unwrap();
        let b = hasher.hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_records_pinned_algorithm() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("any password at all").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("anything", "not-a-hash").is_err());
    }
}
