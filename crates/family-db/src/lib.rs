//! # family-db
//!
//! Storage layer implementing the `UserRepository` port.
//!
//! ## Overview
//!
//! - PostgreSQL connection pool management and migrations (SQLx)
//! - `UserModel` with a SQLx `FromRow` derive and its entity mapper
//! - `PgUserRepository`, the production store
//! - `InMemoryUserRepository`, a process-local store for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use family_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "postgresql://localhost/family_db".to_string(),
//!         ..Default::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryUserRepository, PresenceWrite};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool, MIGRATOR};
pub use repositories::PgUserRepository;
