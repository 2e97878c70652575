//! Message broker configuration.

use serde::{Deserialize, Serialize};

/// Message broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker provider: `"nats"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// NATS server URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Subject prefix for published events.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: default_url(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_url() -> String {
    "nats://127.0.0.1:4222".to_string()
}

fn default_subject_prefix() -> String {
    "gatekey".to_string()
}
