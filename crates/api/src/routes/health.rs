//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when everything below responds, `"degraded"` otherwise.
    pub status: &'static str,
    /// Version baked in at compile time.
    pub version: &'static str,
    /// Result of a round-trip query against the pool.
    pub db_healthy: bool,
}

/// GET /health
///
/// Always answers 200; a broken database shows up in the body, not the
/// status code, so load balancers keep routing while operators see the
/// degradation.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = tareas_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
