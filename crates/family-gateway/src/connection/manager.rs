//! Connection manager
//!
//! Holds every accepted WebSocket connection using DashMap for thread-safe access.

use super::Connection;
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use family_core::ConnectionId;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
///
/// Connections are tracked from upgrade until the socket task ends, whether
/// or not they identified a user.
pub struct ConnectionManager {
    /// Active connections by connection ID
    connections: DashMap<ConnectionId, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        id: ConnectionId,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(id, sender);
        self.connections.insert(id, connection.clone());

        tracing::debug!(connection_id = %id, "Connection added");

        connection
    }

    /// Remove a connection; returns whether it was present
    pub fn remove_connection(&self, id: &ConnectionId) -> bool {
        let removed = self.connections.remove(id).is_some();
        if removed {
            tracing::debug!(connection_id = %id, "Connection removed");
        }
        removed
    }

    /// Broadcast a message to all connections
    ///
    /// Never waits on a slow client: a full or closed channel loses this one
    /// message. Returns the number of connections the message was queued for.
    pub fn broadcast(&self, message: &GatewayMessage) -> usize {
        // Snapshot first so no shard lock is held while sending
        let targets: Vec<Arc<Connection>> =
            self.connections.iter().map(|r| r.value().clone()).collect();

        let mut sent = 0;
        for conn in &targets {
            match conn.try_send(message.clone()) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn.id(),
                        error = %e,
                        "Dropped broadcast message"
                    );
                }
            }
        }

        tracing::debug!(
            event = %message.event,
            sent = sent,
            total = targets.len(),
            "Message broadcast to all connections"
        );

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Check if a connection exists
    pub fn has_connection(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
