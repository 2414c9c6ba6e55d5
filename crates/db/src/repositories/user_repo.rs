//! Repository for the `users` table.
//!
//! Accounts are written once at registration and read by id (token
//! subjects) or by username (login and duplicate checks). There is no
//! update path; profile editing is not part of this API.

use sqlx::PgPool;
use tareas_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str =
    "id, username, email, password_hash, first_name, last_name, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert an account, returning the stored row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Fetch by primary key, as done when resolving a token's `sub` claim.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch by exact username. Usernames are compared case-sensitively.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
