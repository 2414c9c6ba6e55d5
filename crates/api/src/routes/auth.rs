//! `/auth` routes: registration plus the token lifecycle.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// All four endpoints are POST; only logout expects a Bearer token.
///
/// ```text
/// POST /register       -> register
/// POST /login          -> login
/// POST /token/refresh  -> refresh
/// POST /logout         -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/token/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
