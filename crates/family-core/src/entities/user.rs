//! User entity - represents a family member account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PresenceStatus;
use crate::value_objects::UserId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl UserRole {
    /// Get the stored string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "superAdmin",
        }
    }

    /// Parse from the stored string; unknown values fall back to `User`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "superAdmin" => Self::SuperAdmin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
///
/// Presence only ever touches `online_status` and `last_seen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub family_code: Option<String>,
    pub family_id: Option<String>,
    pub profile_picture: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub online_status: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: UserId,
        first_name: String,
        last_name: String,
        username: String,
        email: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name,
            last_name,
            username,
            email,
            family_code: None,
            family_id: None,
            profile_picture: None,
            role: UserRole::default(),
            is_verified: false,
            online_status: false,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Last known presence as recorded in the durable store
    pub fn presence(&self) -> PresenceStatus {
        PresenceStatus {
            online: self.online_status,
            last_seen: self.last_seen,
        }
    }

    /// Apply a presence transition
    ///
    /// Touches only `online_status` and `last_seen`.
    pub fn set_presence(&mut self, online: bool, at: DateTime<Utc>) {
        self.online_status = online;
        self.last_seen = Some(at);
    }
}
