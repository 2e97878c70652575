//! Shared test helpers for HTTP API tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use gatekey_api::state::AppState;
use gatekey_auth::password::hasher::PasswordHasher;
use gatekey_auth::password::validator::PasswordValidator;
use gatekey_broker::memory::MemoryPublisher;
use gatekey_core::config::{
    AppConfig, AuthConfig, BrokerConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use gatekey_database::memory::{MemoryStore, MemoryUnitOfWorkProvider};
use gatekey_service::{AccessEvaluator, IdentityService, UserService};

/// Test application context backed by the in-memory providers.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle to the backing store
    pub store: Arc<MemoryStore>,
    /// Recording event publisher
    pub publisher: Arc<MemoryPublisher>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = test_config();

        let store = Arc::new(MemoryStore::new());
        store.seed_role("user", 10);
        store.seed_role("admin", 100);

        let publisher = Arc::new(MemoryPublisher::new());
        let uow = Arc::new(MemoryUnitOfWorkProvider::new(
            Arc::clone(&store),
            publisher.clone(),
        ));

        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));

        let identity = Arc::new(IdentityService::new(
            &config.auth,
            store.clone(),
            store.clone(),
            uow.clone(),
            Arc::clone(&hasher),
        ));
        let access = Arc::new(AccessEvaluator::new(&config.auth, store.clone()));
        let users = Arc::new(UserService::new(
            store.clone(),
            store.clone(),
            uow,
            hasher,
            validator,
        ));

        let app_state = AppState {
            config: Arc::new(config),
            identity,
            access,
            users,
            db: None,
        };

        let router = gatekey_api::router::build_router(app_state);

        Self {
            router,
            store,
            publisher,
        }
    }

    /// Register a user through the API and return their ID
    pub async fn register_user(&self, email: &str, password: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );

        response.body["data"]["user_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No user_id in registration response")
    }

    /// Login and return the refresh token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["refresh_token"]
            .as_str()
            .expect("No refresh_token in login response")
            .to_string()
    }

    /// Exchange a refresh token for an access token
    pub async fn access_token(&self, refresh_token: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/access-token",
                Some(serde_json::json!({ "refresh_token": refresh_token })),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Build a configuration suitable for tests
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_seconds: 5,
            shutdown_grace_seconds: 1,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        broker: BrokerConfig::default(),
        auth: AuthConfig {
            refresh_secret: "test-refresh-secret".to_string(),
            refresh_ttl_hours: 24,
            access_secret: "test-access-secret".to_string(),
            access_ttl_minutes: 15,
            password_min_length: 8,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
