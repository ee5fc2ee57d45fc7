//! Gateway protocol definitions
//!
//! Server-push only: every frame is a JSON `{ "event", "data" }` envelope.

mod events;
mod messages;

pub use events::{GatewayEventType, UserStatusPayload};
pub use messages::GatewayMessage;
