//! HTTP error type shared by every handler.
//!
//! Handlers return [`AppResult`], and the `?` operator lifts [`CoreError`]
//! and `sqlx::Error` into [`AppError`] via `From`. The [`IntoResponse`]
//! impl renders every variant as `{"error": ..., "code": ...}` JSON so
//! clients see one error shape regardless of where the failure started.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tareas_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain rule violation or lookup miss from `tareas_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error bubbled up from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request outside the domain-validation path.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server-side failure; the message is logged, never sent.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Handler return type.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status, machine-readable code, and client-facing message for a variant.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Unhandled internal error");
                internal_error()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Map a sqlx error onto the response shape.
///
/// `RowNotFound` is a plain 404. A unique-constraint violation on one of
/// our `uq_*` constraints means a duplicate slipped past the handler's
/// pre-check, so it reports like the pre-check would: 400 with a
/// validation code. Anything else is logged and sanitized to a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // 23505 is PostgreSQL's unique_violation.
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Unclassified database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Unclassified database error");
            internal_error()
        }
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
