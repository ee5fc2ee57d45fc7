//! Real-time presence tracking

mod registry;
mod service;

pub use registry::PresenceRegistry;
pub use service::PresenceService;
