//! Event publisher trait for the message broker boundary.

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::result::AppResult;

/// Publishes domain events to the message bus.
///
/// Publication is best-effort from the bus's perspective, but the unit of
/// work gates it: staged events are published at commit time, and a publish
/// failure rolls the whole operation back. Implementations must be safe for
/// concurrent use by many in-flight operations.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single domain event.
    async fn publish(&self, event: &DomainEvent) -> AppResult<()>;
}
