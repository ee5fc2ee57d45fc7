//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use family_core::{User, UserId};
use family_db::InMemoryUserRepository;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh user id that no other test uses
pub fn unique_user_id(prefix: &str) -> String {
    format!("{prefix}_{}", unique_suffix())
}

/// A family member record with the given id
///
/// # Panics
/// Panics if `id` is not a valid user id.
pub fn family_member(id: &str) -> User {
    let suffix = unique_suffix();
    let mut user = User::new(
        UserId::parse(id).expect("fixture user id must be valid"),
        "Test".to_string(),
        format!("Member{suffix}"),
        format!("member{suffix}"),
        format!("member{suffix}@example.com"),
    );
    user.family_code = Some("FAM-TEST".to_string());
    user
}

/// Insert one family member per id and return the ids
pub fn seed_members<S: AsRef<str>>(repo: &InMemoryUserRepository, ids: &[S]) -> Vec<String> {
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            repo.insert(family_member(id));
            id.to_string()
        })
        .collect()
}

/// Body of `GET /api/user/:userId/presence`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    pub user_id: String,
    pub online_status: bool,
    pub last_seen: Option<String>,
}

/// Error body shared by every HTTP route
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
