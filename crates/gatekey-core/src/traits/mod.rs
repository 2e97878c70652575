//! Capability traits shared across crates.

pub mod publisher;

pub use publisher::EventPublisher;
