//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>>;

    /// Patch the durable presence fields (`online_status`, `last_seen`)
    ///
    /// Touches nothing else on the record. Fails with `UserNotFound` when
    /// no record has this id.
    async fn update_presence(
        &self,
        id: &UserId,
        online: bool,
        last_seen: DateTime<Utc>,
    ) -> RepoResult<()>;
}
