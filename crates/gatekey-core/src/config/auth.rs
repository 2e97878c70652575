//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and token configuration.
///
/// The refresh and access secrets sign different token kinds and must be
/// distinct: possession of one kind never grants minting or verification
/// rights over the other. [`AuthConfig::validate`] enforces this at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for refresh token signing (HMAC-SHA256).
    pub refresh_secret: String,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Secret key for access token signing (HMAC-SHA256).
    pub access_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Validate the token configuration.
    ///
    /// Rejects empty secrets, identical refresh/access secrets, and zero
    /// token lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.refresh_secret.is_empty() {
            return Err(AppError::configuration("auth.refresh_secret must be set"));
        }
        if self.access_secret.is_empty() {
            return Err(AppError::configuration("auth.access_secret must be set"));
        }
        if self.refresh_secret == self.access_secret {
            return Err(AppError::configuration(
                "auth.refresh_secret and auth.access_secret must be distinct",
            ));
        }
        if self.refresh_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.refresh_ttl_hours must be greater than zero",
            ));
        }
        if self.access_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.access_ttl_minutes must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_access_ttl() -> u64 {
    15
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            refresh_secret: "refresh-secret".to_string(),
            refresh_ttl_hours: 24,
            access_secret: "access-secret".to_string(),
            access_ttl_minutes: 15,
            password_min_length: 8,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_equal_secrets_rejected() {
        let mut config = valid_config();
        config.access_secret = config.refresh_secret.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = valid_config();
        config.refresh_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let mut config = valid_config();
        config.access_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }
}
