//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::ConnectionManager;
use crate::presence::PresenceService;
use family_core::UserRepository;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Connection manager for WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Presence registry and its durable mirror
    presence: Arc<PresenceService>,
    /// Durable user store
    users: Arc<dyn UserRepository>,
}

impl GatewayState {
    /// Create a new gateway state around a user store
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        let connection_manager = ConnectionManager::new_shared();
        let presence = Arc::new(PresenceService::new(
            users.clone(),
            connection_manager.clone(),
        ));

        Self {
            connection_manager,
            presence,
            users,
        }
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the presence service
    pub fn presence(&self) -> &PresenceService {
        &self.presence
    }

    /// Get the user store
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("presence", &self.presence)
            .finish()
    }
}
