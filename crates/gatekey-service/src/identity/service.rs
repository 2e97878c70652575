//! Identity service — registration, login, token rotation, and subject
//! confirmation.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use gatekey_auth::jwt::TokenCodec;
use gatekey_auth::password::PasswordHasher;
use gatekey_core::config::AuthConfig;
use gatekey_core::error::AppError;
use gatekey_core::events::{DomainEvent, EventPayload, UserEvent};
use gatekey_core::result::AppResult;
use gatekey_database::store::{RoleDirectory, UserStore};
use gatekey_database::uow::{IsolationLevel, UnitOfWork, UnitOfWorkProvider};
use gatekey_entity::{NewUser, Role, User};

/// Role assigned to every newly registered user.
pub const DEFAULT_ROLE: &str = "user";

/// Profile data supplied at registration, before credentials are attached.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewProfile {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Avatar URL (optional).
    pub avatar_url: Option<String>,
}

/// Orchestrates credential and token lifecycle operations.
///
/// Holds two token codecs built from distinct secrets: the refresh codec
/// signs long-lived rotation tokens, the access codec signs short-lived
/// tokens consumed by the access evaluator. Neither kind verifies under
/// the other's secret.
#[derive(Clone)]
pub struct IdentityService {
    /// Read access to user records.
    store: Arc<dyn UserStore>,
    /// Read access to the role directory.
    roles: Arc<dyn RoleDirectory>,
    /// Unit-of-work provider for writes.
    uow: Arc<dyn UnitOfWorkProvider>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Codec for long-lived refresh tokens.
    refresh_codec: TokenCodec,
    /// Codec for short-lived access tokens.
    access_codec: TokenCodec,
}

impl IdentityService {
    /// Creates a new identity service from auth configuration.
    pub fn new(
        config: &AuthConfig,
        store: Arc<dyn UserStore>,
        roles: Arc<dyn RoleDirectory>,
        uow: Arc<dyn UnitOfWorkProvider>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            store,
            roles,
            uow,
            hasher,
            refresh_codec: TokenCodec::new(
                &config.refresh_secret,
                Duration::hours(config.refresh_ttl_hours as i64),
            ),
            access_codec: TokenCodec::new(
                &config.access_secret,
                Duration::minutes(config.access_ttl_minutes as i64),
            ),
        }
    }

    /// Registers a new user with the default role.
    ///
    /// The user insert and the "registered" notification are one unit of
    /// work: if the notification cannot be published, the insert rolls
    /// back and no user row remains.
    pub async fn register(&self, profile: NewProfile, password: &str) -> AppResult<Uuid> {
        if password.is_empty() {
            return Err(AppError::invalid_credentials("Password is required"));
        }

        let password_hash = self.hasher.hash_password(password).map_err(|e| {
            warn!(error = %e, "Password hashing failed during registration");
            AppError::invalid_credentials("Password could not be processed")
        })?;

        let mut uow = self.uow.begin(IsolationLevel::ReadCommitted).await?;

        let role = uow
            .role_by_name(DEFAULT_ROLE)
            .await?
            .ok_or_else(|| AppError::internal("Default role is not seeded"))?;

        let user = uow
            .insert_user(&NewUser {
                name: profile.name,
                email: profile.email,
                password_hash,
                avatar_url: profile.avatar_url,
                role_id: role.id,
            })
            .await?;

        uow.stage_event(DomainEvent::new(EventPayload::User(UserEvent::Registered {
            user_id: user.id,
            email: user.email.clone(),
        })));

        uow.commit().await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    /// Authenticates an email/password pair and mints a refresh token.
    ///
    /// An unknown email and a wrong password return the same error kind so
    /// callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let Some(user) = self.store.find_by_email(email).await? else {
            debug!("Login attempt for unknown email");
            return Err(invalid_credentials());
        };

        let role = self
            .roles
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        self.mint(&self.refresh_codec, &user, &role)
    }

    /// Rotates a refresh token.
    ///
    /// The old token is verified and the subject re-read from live state,
    /// so a role change or deletion since issuance is honored; the new
    /// token carries the current email and role.
    pub async fn refresh_session(&self, refresh_token: &str) -> AppResult<String> {
        let (user, role) = self.live_subject(refresh_token).await?;
        self.mint(&self.refresh_codec, &user, &role)
    }

    /// Mints a short-lived access token from a valid refresh token.
    ///
    /// Same verification and live re-read as [`Self::refresh_session`].
    pub async fn issue_access_token(&self, refresh_token: &str) -> AppResult<String> {
        let (user, role) = self.live_subject(refresh_token).await?;
        self.mint(&self.access_codec, &user, &role)
    }

    /// Asserts that a refresh token's subject is the claimed user.
    pub async fn confirm_subject(&self, refresh_token: &str, claimed_user_id: Uuid) -> AppResult<()> {
        let claims = self.verify_refresh(refresh_token)?;

        if claims.sub != claimed_user_id {
            return Err(AppError::identity_mismatch(
                "Token subject does not match the claimed user",
            ));
        }
        Ok(())
    }

    /// Verifies a refresh token, collapsing every failure into one opaque
    /// error kind.
    fn verify_refresh(&self, token: &str) -> AppResult<gatekey_auth::jwt::Claims> {
        self.refresh_codec.verify(token).map_err(|e| {
            debug!(reason = %e, "Refresh token rejected");
            AppError::invalid_refresh_token("Invalid refresh token")
        })
    }

    /// Verifies a refresh token and re-reads its subject from live state.
    async fn live_subject(&self, token: &str) -> AppResult<(User, Role)> {
        let claims = self.verify_refresh(token)?;

        let user = self
            .store
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::invalid_refresh_token("Invalid refresh token"))?;

        let role = self
            .roles
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AppError::invalid_refresh_token("Invalid refresh token"))?;

        Ok((user, role))
    }

    fn mint(&self, codec: &TokenCodec, user: &User, role: &Role) -> AppResult<String> {
        codec
            .mint(user.id, &user.email, &role.name)
            .map_err(|e| AppError::with_source(
                gatekey_core::error::ErrorKind::Internal,
                "Failed to mint token",
                e,
            ))
    }
}

fn invalid_credentials() -> AppError {
    AppError::invalid_credentials("Invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekey_broker::memory::MemoryPublisher;
    use gatekey_core::error::ErrorKind;
    use gatekey_database::memory::{MemoryStore, MemoryUnitOfWorkProvider};
    use gatekey_entity::UserUpdate;

    struct Harness {
        service: IdentityService,
        store: Arc<MemoryStore>,
        publisher: Arc<MemoryPublisher>,
        admin_role_id: Uuid,
    }

    fn auth_config() -> AuthConfig {
        AuthConfig {
            refresh_secret: "test-refresh-secret".to_string(),
            refresh_ttl_hours: 24,
            access_secret: "test-access-secret".to_string(),
            access_ttl_minutes: 15,
            password_min_length: 8,
        }
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        store.seed_role(DEFAULT_ROLE, 10);
        let admin = store.seed_role("admin", 100);

        let publisher = Arc::new(MemoryPublisher::new());
        let uow = Arc::new(MemoryUnitOfWorkProvider::new(
            Arc::clone(&store),
            Arc::clone(&publisher) as _,
        ));

        let service = IdentityService::new(
            &auth_config(),
            Arc::clone(&store) as _,
            Arc::clone(&store) as _,
            uow,
            Arc::new(PasswordHasher::new()),
        );

        Harness {
            service,
            store,
            publisher,
            admin_role_id: admin.id,
        }
    }

    fn profile(email: &str) -> NewProfile {
        NewProfile {
            name: Some("Alice".to_string()),
            email: email.to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_and_publishes() {
        let h = harness();

        let user_id = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();

        assert_eq!(h.store.user_count(), 1);
        let events = h.publisher.published_to("user.registered");
        assert_eq!(events.len(), 1);
        let EventPayload::User(UserEvent::Registered { user_id: id, email }) = &events[0].payload
        else {
            panic!("unexpected payload");
        };
        assert_eq!(*id, user_id);
        assert_eq!(email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let h = harness();

        h.service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let err = h
            .service
            .register(profile("alice@example.com"), "other-password")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::AlreadyExists);
        assert_eq!(h.store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_rolls_back_when_publish_fails() {
        let h = harness();
        h.publisher.set_failing(true);

        let err = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Broker);
        assert_eq!(h.store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_register_empty_password() {
        let h = harness();
        let err = h
            .service
            .register(profile("alice@example.com"), "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_mints_verifiable_refresh_token() {
        let h = harness();
        let user_id = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();

        let token = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();

        let codec = TokenCodec::new("test-refresh-secret", Duration::hours(24));
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, DEFAULT_ROLE);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let h = harness();
        h.service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();

        let wrong_password = h
            .service
            .login("alice@example.com", "wrong-password")
            .await
            .unwrap_err();
        let unknown_email = h
            .service
            .login("nobody@example.com", "hunter2hunter2")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
        assert_eq!(unknown_email.kind, wrong_password.kind);
        assert_eq!(unknown_email.message, wrong_password.message);
    }

    #[tokio::test]
    async fn test_refresh_session_honors_role_change() {
        let h = harness();
        let user_id = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let token = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();

        // Promote the user after the token was issued.
        let uow_provider = MemoryUnitOfWorkProvider::new(
            Arc::clone(&h.store),
            Arc::new(MemoryPublisher::new()) as _,
        );
        let mut uow = uow_provider
            .begin(IsolationLevel::ReadCommitted)
            .await
            .unwrap();
        uow.update_user(
            user_id,
            &UserUpdate {
                role_id: Some(h.admin_role_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        uow.commit().await.unwrap();

        let rotated = h.service.refresh_session(&token).await.unwrap();

        let codec = TokenCodec::new("test-refresh-secret", Duration::hours(24));
        assert_eq!(codec.verify(&rotated).unwrap().role, "admin");
    }

    #[tokio::test]
    async fn test_refresh_session_rejects_deleted_subject() {
        let h = harness();
        let user_id = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let token = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();

        let uow_provider = MemoryUnitOfWorkProvider::new(
            Arc::clone(&h.store),
            Arc::new(MemoryPublisher::new()) as _,
        );
        let mut uow = uow_provider
            .begin(IsolationLevel::ReadCommitted)
            .await
            .unwrap();
        uow.delete_user(user_id).await.unwrap();
        uow.commit().await.unwrap();

        let err = h.service.refresh_session(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_access_token_uses_access_secret() {
        let h = harness();
        h.service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let refresh = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();

        let access = h.service.issue_access_token(&refresh).await.unwrap();

        let access_codec = TokenCodec::new("test-access-secret", Duration::minutes(15));
        let refresh_codec = TokenCodec::new("test-refresh-secret", Duration::hours(24));
        assert!(access_codec.verify(&access).is_ok());
        assert!(refresh_codec.verify(&access).is_err());
    }

    #[tokio::test]
    async fn test_access_token_cannot_rotate() {
        let h = harness();
        h.service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let refresh = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();
        let access = h.service.issue_access_token(&refresh).await.unwrap();

        let err = h.service.refresh_session(&access).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_confirm_subject() {
        let h = harness();
        let user_id = h
            .service
            .register(profile("alice@example.com"), "hunter2hunter2")
            .await
            .unwrap();
        let token = h
            .service
            .login("alice@example.com", "hunter2hunter2")
            .await
            .unwrap();

        assert!(h.service.confirm_subject(&token, user_id).await.is_ok());

        let err = h
            .service
            .confirm_subject(&token, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::IdentityMismatch);

        let err = h
            .service
            .confirm_subject("garbage", user_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRefreshToken);
    }
}
