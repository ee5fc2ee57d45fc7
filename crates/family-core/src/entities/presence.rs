//! Durable presence status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known connectivity of a user, as persisted on the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceStatus {
    #[serde(rename = "onlineStatus")]
    pub online: bool,
    pub last_seen: Option<DateTime<Utc>>,
}
