//! Password policy enforcement for new passwords.

use gatekey_core::config::AuthConfig;
use gatekey_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::invalid_credentials("Password is required"));
        }

        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekey_core::error::ErrorKind;

    fn validator() -> PasswordValidator {
        PasswordValidator { min_length: 8 }
    }

    #[test]
    fn test_accepts_long_enough_password() {
        assert!(validator().validate("long enough").is_ok());
    }

    #[test]
    fn test_rejects_empty_password() {
        let err = validator().validate("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[test]
    fn test_rejects_short_password() {
        let err = validator().validate("short").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
