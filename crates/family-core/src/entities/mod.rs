//! Domain entities - core business objects

mod presence;
mod user;

pub use presence::PresenceStatus;
pub use user::{User, UserRole};
