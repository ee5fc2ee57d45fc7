//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in family-core.

mod error;
mod user;

pub use user::PgUserRepository;
