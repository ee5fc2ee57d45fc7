//! Durable presence read endpoint
//!
//! Lets a client that was offline during a broadcast catch up from the
//! stored `onlineStatus` / `lastSeen` fields.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use family_core::{DomainError, UserId};
use serde::Serialize;

use crate::response::{ApiError, ApiResult};
use crate::server::GatewayState;

/// Stored presence of one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    pub user_id: UserId,
    pub online_status: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Get a user's durable presence
///
/// GET /api/user/:user_id/presence
pub async fn get_user_presence(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<PresenceResponse>> {
    let user_id =
        UserId::parse(&user_id).map_err(|e| ApiError::invalid_path(format!("user_id: {e}")))?;

    let user = state
        .users()
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user_id.clone()))?;

    let status = user.presence();
    Ok(Json(PresenceResponse {
        user_id: user.id,
        online_status: status.online,
        last_seen: status.last_seen,
    }))
}
