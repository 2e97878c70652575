//! NATS event publisher.

use async_trait::async_trait;
use bytes::Bytes;

use gatekey_core::config::BrokerConfig;
use gatekey_core::error::{AppError, ErrorKind};
use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_core::traits::EventPublisher;

/// Publishes domain events to a NATS server.
///
/// Subjects are `{prefix}.{event subject}`, e.g. `gatekey.user.registered`,
/// with a JSON-serialized [`DomainEvent`] payload.
#[derive(Clone)]
pub struct NatsPublisher {
    client: async_nats::Client,
    subject_prefix: String,
}

impl NatsPublisher {
    /// Connect to the configured NATS server.
    pub async fn connect(config: &BrokerConfig) -> AppResult<Self> {
        let client = async_nats::connect(&config.url).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Broker,
                format!("Failed to connect to NATS at {}", config.url),
                e,
            )
        })?;

        Ok(Self {
            client,
            subject_prefix: config.subject_prefix.clone(),
        })
    }
}

#[async_trait]
impl EventPublisher for NatsPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        let subject = format!("{}.{}", self.subject_prefix, event.subject());
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(subject, Bytes::from(payload))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Broker, "Failed to publish event", e)
            })?;

        // The publish call only enqueues; flush so a broker outage surfaces
        // inside the unit of work instead of after commit.
        self.client
            .flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Broker, "Failed to flush publisher", e))
    }
}
