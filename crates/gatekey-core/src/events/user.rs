//! User-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to user operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A new user was registered.
    Registered {
        /// The user ID.
        user_id: Uuid,
        /// The registered email address.
        email: String,
    },
    /// A user's profile was updated.
    Updated {
        /// The user ID.
        user_id: Uuid,
    },
    /// A user was deleted.
    Deleted {
        /// The user ID.
        user_id: Uuid,
    },
}

impl UserEvent {
    /// The broker subject suffix for this event.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "user.registered",
            Self::Updated { .. } => "user.updated",
            Self::Deleted { .. } => "user.deleted",
        }
    }
}
