//! Session row and its create DTO.
//!
//! The refresh token itself never reaches the database; rows carry the
//! SHA-256 hex digest. Logout and refresh rotation flip `is_revoked`
//! rather than deleting, which keeps an audit trail of issued tokens.

use sqlx::FromRow;
use tareas_core::types::{DbId, Timestamp};

/// Row of the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for inserting a session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
