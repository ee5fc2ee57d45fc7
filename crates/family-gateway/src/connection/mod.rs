//! Connection management
//!
//! Tracks accepted WebSocket connections and fans messages out to them.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::ConnectionManager;
