//! User entity <-> model mapper

use family_core::entities::{User, UserRole};
use family_core::error::DomainError;
use family_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Fails only if a row carries an id that the domain would reject.
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::parse(&model.id)?,
            first_name: model.first_name,
            last_name: model.last_name,
            username: model.username,
            email: model.email,
            family_code: model.family_code,
            family_id: model.family_id,
            profile_picture: model.profile_picture,
            role: UserRole::from_str_or_default(&model.role),
            is_verified: model.is_verified,
            online_status: model.online_status,
            last_seen: model.last_seen,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
