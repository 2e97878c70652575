//! Domain events emitted by Gatekey operations.
//!
//! Events are staged inside a unit of work and published to the message
//! broker at commit time. Downstream services (mailers, provisioning,
//! audit) consume them off the bus.

pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use user::UserEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A user-related event.
    User(UserEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// The broker subject suffix for this event, e.g. `user.registered`.
    pub fn subject(&self) -> &'static str {
        match &self.payload {
            EventPayload::User(event) => event.subject(),
        }
    }
}
