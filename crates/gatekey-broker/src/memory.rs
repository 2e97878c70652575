//! In-memory recording publisher.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use gatekey_core::error::AppError;
use gatekey_core::events::DomainEvent;
use gatekey_core::result::AppResult;
use gatekey_core::traits::EventPublisher;

/// Publisher that records events in process memory.
///
/// Used as the development provider and by tests, which can inspect what
/// would have been published and force publish failures to exercise
/// rollback paths.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    published: Mutex<Vec<DomainEvent>>,
    failing: AtomicBool,
}

impl MemoryPublisher {
    /// Create a new recording publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far.
    pub fn published(&self) -> Vec<DomainEvent> {
        self.published
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Events whose subject matches exactly.
    pub fn published_to(&self, subject: &str) -> Vec<DomainEvent> {
        self.published()
            .into_iter()
            .filter(|e| e.subject() == subject)
            .collect()
    }

    /// When set, every publish attempt fails with a broker error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::broker("Simulated publish failure"));
        }

        self.published
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
        Ok(())
    }
}
