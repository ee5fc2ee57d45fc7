//! Error handling utilities for repositories

use family_core::error::DomainError;
use family_core::value_objects::UserId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: &UserId) -> DomainError {
    DomainError::UserNotFound(id.clone())
}
