//! User handlers
//!
//! Endpoints for the caller's own record and the contact list.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use courier_core::{DomainError, User, UserId};
use serde::Serialize;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// User record as exposed by the API (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// Get the authenticated user's own record
///
/// GET /auth/user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_repo()
        .find_by_id(auth.user_id)
        .await?
        .ok_or(DomainError::UserNotFound(auth.user_id))?;

    Ok(Json(UserResponse::from(user)))
}

/// List all other users (the contact list)
///
/// GET /auth/fetch-user
pub async fn fetch_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_repo()
        .list_all()
        .await?
        .into_iter()
        .filter(|u| u.id != auth.user_id)
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}
