//! Presence registry
//!
//! Process-local map from user to the one connection currently speaking for
//! that user. Never persisted; empty after a restart.

use family_core::{ConnectionId, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Both directions of the mapping, kept in step under one lock
#[derive(Debug, Default)]
struct Entries {
    by_user: HashMap<UserId, ConnectionId>,
    by_connection: HashMap<ConnectionId, UserId>,
}

/// Live user -> connection registry
///
/// Invariant: at most one connection per user. Registering a second
/// connection for the same user replaces the first, and the replaced
/// connection no longer resolves to any user.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    entries: RwLock<Entries>,
}

impl PresenceRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `user_id` to `connection_id`
    ///
    /// Returns the connection this replaced, if any. Last writer wins.
    pub fn register(&self, user_id: UserId, connection_id: ConnectionId) -> Option<ConnectionId> {
        let mut entries = self.entries.write();

        let replaced = entries.by_user.insert(user_id.clone(), connection_id);
        if let Some(old) = replaced {
            entries.by_connection.remove(&old);
        }
        // A connection re-identifying drops its previous user
        if let Some(previous_user) = entries.by_connection.insert(connection_id, user_id.clone()) {
            if previous_user != user_id {
                entries.by_user.remove(&previous_user);
            }
        }

        replaced.filter(|old| *old != connection_id)
    }

    /// Remove whichever user `connection_id` currently speaks for
    ///
    /// Returns `None` when the connection never registered or was already
    /// replaced or removed.
    pub fn unregister(&self, connection_id: &ConnectionId) -> Option<UserId> {
        let mut entries = self.entries.write();

        let user_id = entries.by_connection.remove(connection_id)?;
        entries.by_user.remove(&user_id);
        Some(user_id)
    }

    /// Connection currently mapped to a user
    pub fn connection_for(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.entries.read().by_user.get(user_id).copied()
    }

    /// User a connection currently speaks for
    pub fn user_for(&self, connection_id: &ConnectionId) -> Option<UserId> {
        self.entries.read().by_connection.get(connection_id).cloned()
    }

    /// Whether a user has a live entry
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.entries.read().by_user.contains_key(user_id)
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.entries.read().by_user.len()
    }

    /// Whether no user is tracked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
