//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tareas_core::types::{DbId, Timestamp};

/// Task row joined with its category name and owner username, the shape
/// every task endpoint responds with. No raw-row struct exists because
/// nothing reads a task without the joins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskResponse {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub category_name: String,
    pub state: String,
    pub color: String,
    pub owner_id: DbId,
    pub owner_username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub finalized_at: Option<Timestamp>,
}

/// DTO for creating a new task. Owner and color are decided server-side
/// before this struct is built; tasks always start in the pending state.
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
    pub color: String,
    pub owner_id: DbId,
}

/// DTO for updating a task's editable fields. All fields are optional;
/// omitted fields are left unchanged. State, color, owner, and timestamps
/// are never writable through this path.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
}
