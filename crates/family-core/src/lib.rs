//! # family-core
//!
//! Domain layer containing identifiers, the user entity, presence status, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{PresenceStatus, User, UserRole};
pub use error::DomainError;
pub use traits::{RepoResult, UserRepository};
pub use value_objects::{ConnectionId, UserId, UserIdParseError};
