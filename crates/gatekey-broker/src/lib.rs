//! # gatekey-broker
//!
//! Message broker integration for Gatekey. Publishes domain events to
//! NATS, with an in-memory recording publisher for tests and development.

pub mod memory;
pub mod nats;
pub mod provider;

pub use provider::BrokerManager;
