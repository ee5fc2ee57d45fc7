//! User ID - opaque identifier of a user record
//!
//! Accepts document-store ids (24 hex chars), UUIDs, and similar tokens:
//! 1-64 bytes of ASCII letters, digits, `-` or `_`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque, validated user identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl UserId {
    /// Maximum length in bytes
    pub const MAX_LEN: usize = 64;

    /// Parse and validate a user ID
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        if s.is_empty() {
            return Err(UserIdParseError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(UserIdParseError::TooLong { max: Self::MAX_LEN });
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(UserIdParseError::InvalidCharacter(c));
        }
        Ok(Self(s.to_owned()))
    }

    /// Get the ID as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a UserId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("user id is empty")]
    Empty,

    #[error("user id longer than {max} bytes")]
    TooLong { max: usize },

    #[error("invalid character in user id: {0:?}")]
    InvalidCharacter(char),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// Deserialization goes through validation so malformed ids never reach the domain
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        UserId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
