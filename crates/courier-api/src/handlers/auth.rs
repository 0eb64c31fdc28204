//! Authentication handlers
//!
//! Endpoints for signup, login, logout, and token refresh.

use axum::{extract::State, Json};
use courier_common::{validate_password_strength, AppError, TokenPair};
use courier_core::{DomainError, User, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extractors::{AuthUser, OptionalAuthUser, ValidatedJson};
use crate::handlers::users::UserResponse;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Signup request body
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: String,
}

/// Refresh request body
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokenPair,
}

/// Token verification response
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub authenticated: bool,
}

/// Register a new user
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    validate_password_strength(&request.password)?;

    if state.user_repo().username_exists(&request.username).await? {
        return Err(DomainError::UsernameAlreadyExists.into());
    }

    let password_hash = state.password_service().hash(&request.password)?;
    let user = User::new(UserId::new(), request.username);
    state.user_repo().create(&user, &password_hash).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let tokens = state.jwt_service().generate_token_pair(user.id)?;
    Ok(Created(Json(AuthResponse {
        user: UserResponse::from(user),
        tokens,
    })))
}

/// Login with username and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .user_repo()
        .find_by_username(&request.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let hash = state
        .user_repo()
        .get_password_hash(user.id)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    state
        .password_service()
        .verify_or_error(&request.password, &hash)?;

    tracing::info!(user_id = %user.id, "User logged in");

    let tokens = state.jwt_service().generate_token_pair(user.id)?;
    Ok(Json(AuthResponse {
        user: UserResponse::from(user),
        tokens,
    }))
}

/// Exchange a refresh token for a new token pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state.jwt_service().refresh_tokens(&request.refresh_token)?;
    Ok(Json(tokens))
}

/// Logout user
///
/// POST /auth/logout
///
/// Tokens are stateless, so there is nothing to revoke server-side;
/// this exists so clients have a definitive end-of-session call.
pub async fn logout(auth: AuthUser) -> ApiResult<NoContent> {
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok(NoContent)
}

/// Report whether the presented bearer token is valid
///
/// GET /auth/verify
pub async fn verify(OptionalAuthUser(auth): OptionalAuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        authenticated: auth.is_some(),
    })
}
