//! Presence service
//!
//! Drives the registry from connection lifecycle events, mirrors each
//! transition onto the durable user record, and broadcasts it.

use super::PresenceRegistry;
use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use chrono::Utc;
use family_core::{ConnectionId, UserId, UserRepository};
use std::sync::Arc;

/// Presence tracking for all connected users
///
/// Each operation runs registry mutation, then the durable write, then the
/// broadcast. A failed durable write is logged and does not stop the other
/// two steps.
pub struct PresenceService {
    registry: PresenceRegistry,
    users: Arc<dyn UserRepository>,
    connections: Arc<ConnectionManager>,
}

impl PresenceService {
    /// Create a new presence service
    pub fn new(users: Arc<dyn UserRepository>, connections: Arc<ConnectionManager>) -> Self {
        Self {
            registry: PresenceRegistry::new(),
            users,
            connections,
        }
    }

    /// Read-only view of the live registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// A connection identified itself with `raw_user_id`
    ///
    /// An absent or malformed id leaves the connection untracked. Returns the
    /// user now online, if any.
    pub async fn connect(
        &self,
        raw_user_id: Option<&str>,
        connection_id: ConnectionId,
    ) -> Option<UserId> {
        let user_id = match raw_user_id.map(UserId::parse) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "Malformed user id; connection not tracked"
                );
                return None;
            }
            None => {
                tracing::debug!(connection_id = %connection_id, "No user id; connection not tracked");
                return None;
            }
        };

        if let Some(replaced) = self.registry.register(user_id.clone(), connection_id) {
            tracing::debug!(
                user_id = %user_id,
                connection_id = %connection_id,
                replaced = %replaced,
                "Replaced previous connection for user"
            );
        }

        self.persist(&user_id, true).await;
        let recipients = self.broadcast(&user_id, true);

        tracing::info!(
            user_id = %user_id,
            connection_id = %connection_id,
            recipients,
            "User is now online"
        );

        Some(user_id)
    }

    /// The connection `connection_id` closed
    ///
    /// No-op unless this connection is the one currently registered for its
    /// user. Returns the user now offline, if any.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> Option<UserId> {
        let user_id = self.registry.unregister(&connection_id)?;

        self.persist(&user_id, false).await;
        let recipients = self.broadcast(&user_id, false);

        tracing::info!(
            user_id = %user_id,
            connection_id = %connection_id,
            recipients,
            "User is now offline"
        );

        Some(user_id)
    }

    /// Write the durable status; failures are logged and swallowed
    async fn persist(&self, user_id: &UserId, online: bool) {
        if let Err(e) = self.users.update_presence(user_id, online, Utc::now()).await {
            tracing::warn!(
                user_id = %user_id,
                online = online,
                error = %e,
                "Failed to persist presence status"
            );
        }
    }

    /// Deliver the status event to every open connection
    fn broadcast(&self, user_id: &UserId, online: bool) -> usize {
        self.connections
            .broadcast(&GatewayMessage::user_status_update(user_id, online))
    }
}

impl std::fmt::Debug for PresenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceService")
            .field("registry", &self.registry)
            .field("connections", &self.connections)
            .finish()
    }
}
