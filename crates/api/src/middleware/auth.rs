//! Request authentication via an extractor.
//!
//! Protected handlers take an [`AuthUser`] parameter instead of sitting
//! behind a router-level layer. The extractor reads the `Authorization`
//! header, verifies the bearer JWT, and hands the handler the caller's id;
//! any failure short-circuits into a 401 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tareas_core::error::CoreError;
use tareas_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The verified caller of a protected endpoint.
///
/// ```ignore
/// async fn list(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<...>> {
///     TaskRepo::count_all(&state.pool, auth_user.user_id).await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Database id taken from the token's `sub` claim.
    pub user_id: DbId,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
