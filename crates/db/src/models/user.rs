//! User row, its public projection, and the create DTO.

use serde::Serialize;
use sqlx::FromRow;
use tareas_core::types::{DbId, Timestamp};

/// Row of the `users` table, password hash included.
///
/// This type must not be serialized into a response body; convert to
/// [`UserResponse`] first, which drops the hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-facing view of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Fields for inserting an account. Hashing happens before construction;
/// no plaintext password passes through this type.
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
