//! # family-gateway
//!
//! WebSocket gateway that tracks which family members are online and pushes
//! every status change to all connected clients.

pub mod connection;
pub mod presence;
pub mod protocol;
pub mod response;
pub mod server;

pub use server::{create_app, create_gateway_state, run, serve, GatewayState};
