//! Access evaluator — the hot-path permission check.

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use gatekey_auth::jwt::TokenCodec;
use gatekey_core::config::AuthConfig;
use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;
use gatekey_database::store::RoleDirectory;

/// Verifies access tokens and compares trust levels.
///
/// Read-only and stateless beyond its codec and the role directory handle,
/// so it is safe to call concurrently and frequently — this is the check
/// every other service runs before serving a privileged operation. It
/// holds only the access codec; refresh tokens never verify here.
#[derive(Clone)]
pub struct AccessEvaluator {
    /// Codec bound to the access-token secret.
    codec: TokenCodec,
    /// Read access to the role directory.
    roles: Arc<dyn RoleDirectory>,
}

impl AccessEvaluator {
    /// Creates a new evaluator from auth configuration.
    pub fn new(config: &AuthConfig, roles: Arc<dyn RoleDirectory>) -> Self {
        Self {
            codec: TokenCodec::new(
                &config.access_secret,
                Duration::minutes(config.access_ttl_minutes as i64),
            ),
            roles,
        }
    }

    /// Checks whether the token's subject meets the required trust level.
    ///
    /// Succeeds iff the token verifies and the resolved role level is at
    /// least `required_level` (equal levels are sufficient). A role name
    /// that no longer resolves implies stale or forged claims and is
    /// treated as an invalid token, not a missing resource.
    pub async fn check(&self, access_token: &str, required_level: i32) -> AppResult<()> {
        let claims = self.codec.verify(access_token).map_err(|e| {
            debug!(reason = %e, "Access token rejected");
            AppError::invalid_token("Invalid access token")
        })?;

        let role = self
            .roles
            .find_by_name(&claims.role)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid access token"))?;

        if role.satisfies(required_level) {
            Ok(())
        } else {
            Err(AppError::permission_denied("Insufficient trust level"))
        }
    }
}
