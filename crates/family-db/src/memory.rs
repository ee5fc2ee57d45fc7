//! In-memory implementation of UserRepository
//!
//! Backs tests and local runs without PostgreSQL. Every presence write is
//! appended to a log so callers can assert on exactly what was persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use family_core::entities::User;
use family_core::error::DomainError;
use family_core::traits::{RepoResult, UserRepository};
use family_core::value_objects::UserId;

/// One recorded `update_presence` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceWrite {
    pub user_id: UserId,
    pub online: bool,
    pub last_seen: DateTime<Utc>,
    /// Whether the write reached a stored record
    pub applied: bool,
}

/// Process-local user store
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
    writes: Mutex<Vec<PresenceWrite>>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record
    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Get a copy of a stored user
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|u| u.clone())
    }

    /// All presence writes attempted so far, in call order
    pub fn presence_writes(&self) -> Vec<PresenceWrite> {
        self.writes.lock().clone()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn update_presence(
        &self,
        id: &UserId,
        online: bool,
        last_seen: DateTime<Utc>,
    ) -> RepoResult<()> {
        let applied = match self.users.get_mut(id) {
            Some(mut user) => {
                user.set_presence(online, last_seen);
                true
            }
            None => false,
        };

        self.writes.lock().push(PresenceWrite {
            user_id: id.clone(),
            online,
            last_seen,
            applied,
        });

        if applied {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id.clone()))
        }
    }
}
