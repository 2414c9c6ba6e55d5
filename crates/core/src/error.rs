use crate::types::DbId;

/// Domain-level error shared by every crate in the workspace.
///
/// The API layer maps each variant onto an HTTP status; nothing in `core`
/// or `db` knows about status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
