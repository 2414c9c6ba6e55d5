//! Category entity model.
//!
//! Categories are shared across users: any authenticated user may create,
//! rename, or delete any category. Deleting one cascades to its tasks.

use serde::Serialize;
use sqlx::FromRow;
use tareas_core::types::{DbId, Timestamp};

/// Full category row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category projection for API responses, carrying the number of tasks
/// (across all owners) that reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub task_count: i64,
}

/// Outcome of seeding the default categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Names inserted by this run.
    pub created: u64,
    /// Names that were already present.
    pub existing: u64,
}
