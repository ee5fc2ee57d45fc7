//! Gateway message format

use super::{GatewayEventType, UserStatusPayload};
use family_core::UserId;
use serde::{Deserialize, Serialize};

/// Gateway message format
///
/// All messages sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Event name
    pub event: GatewayEventType,

    /// Event data payload
    pub data: UserStatusPayload,
}

impl GatewayMessage {
    /// Create a `userStatusUpdate` message
    #[must_use]
    pub fn user_status_update(user_id: &UserId, online_status: bool) -> Self {
        let payload = UserStatusPayload {
            user_id: user_id.clone(),
            online_status,
        };

        Self {
            event: GatewayEventType::UserStatusUpdate,
            data: payload,
        }
    }

    /// Try to read the data as a `userStatusUpdate` payload
    pub fn as_user_status(&self) -> Option<UserStatusPayload> {
        match self.event {
            GatewayEventType::UserStatusUpdate => Some(self.data.clone()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
