//! Handlers for the `/auth` resource: register, login, token refresh, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tareas_core::error::CoreError;
use tareas_core::types::DbId;
use tareas_db::models::session::CreateSession;
use tareas_db::models::user::{CreateUser, UserResponse};
use tareas_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/logout`.
///
/// `refresh_token` is optional at the serde level so a missing field produces
/// a controlled 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Body returned by both login and refresh: the token pair plus the
/// authenticated user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a new user account. Returns 201 with the public user info.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()).into());
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Friendly duplicate check; the unique constraint still backstops races.
    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(
            CoreError::Validation("A user with that username already exists".into()).into(),
        );
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/auth/login
///
/// Check the credentials and, when they hold, open a session: the response
/// carries the token pair and the user projection.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(bad_credentials());
    }

    let user_id = user.id;
    let response = create_auth_response(&state, user_id, UserResponse::from(user)).await?;

    tracing::info!(user_id, "User logged in");

    Ok(Json(response))
}

/// POST /api/auth/token/refresh
///
/// Exchange a valid refresh token for a fresh token pair. The presented
/// token is consumed even if the exchange fails afterwards, so a stolen
/// token can be used at most once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Consume first, then look the user up.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, user.id, UserResponse::from(user)).await?;

    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke the presented refresh token. Returns 200 with a confirmation
/// message. Unknown, expired, already-revoked and foreign tokens all
/// collapse to the same 400 so callers cannot probe which tokens exist.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<LogoutRequest>,
) -> AppResult<Json<Value>> {
    let refresh_token = match input.refresh_token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AppError::BadRequest("Refresh token is required".into())),
    };

    let token_hash = hash_refresh_token(refresh_token);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .filter(|s| s.user_id == auth_user.user_id)
        .ok_or_else(|| AppError::BadRequest("Invalid or expired token".into()))?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        // Lost a race with another revocation.
        return Err(AppError::BadRequest("Invalid or expired token".into()));
    }

    tracing::info!(user_id = auth_user.user_id, "User logged out");

    Ok(Json(json!({ "message": "Successfully logged out" })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bad_credentials() -> AppError {
    // Unknown username and wrong password must be indistinguishable.
    CoreError::Unauthorized("Invalid username or password".into()).into()
}

/// Mint the token pair for `user_id`, record the refresh session, and
/// assemble the body shared by login and refresh.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    user: UserResponse,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user_id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user,
    })
}
