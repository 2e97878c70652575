//! Broker manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use gatekey_core::config::BrokerConfig;
use gatekey_core::error::AppError;
use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_core::traits::EventPublisher;

/// Broker manager that wraps the configured event publisher.
///
/// The provider is selected at construction time based on configuration.
#[derive(Clone)]
pub struct BrokerManager {
    /// The inner event publisher.
    inner: Arc<dyn EventPublisher>,
}

impl BrokerManager {
    /// Create a new broker manager from configuration.
    pub async fn new(config: &BrokerConfig) -> AppResult<Self> {
        let inner: Arc<dyn EventPublisher> = match config.provider.as_str() {
            "nats" => {
                info!(url = %config.url, "Initializing NATS broker provider");
                let publisher = crate::nats::NatsPublisher::connect(config).await?;
                Arc::new(publisher)
            }
            "memory" => {
                info!("Initializing in-memory broker provider");
                Arc::new(crate::memory::MemoryPublisher::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown broker provider: '{other}'. Supported: memory, nats"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a broker manager from an existing publisher (for testing).
    pub fn from_publisher(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { inner: publisher }
    }

    /// Get a cloneable handle to the inner publisher.
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl EventPublisher for BrokerManager {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        self.inner.publish(event).await
    }
}
