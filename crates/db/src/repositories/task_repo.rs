//! Repository for the `tasks` table.
//!
//! Every method takes the owner's id and filters on it in SQL, so a task
//! belonging to someone else behaves exactly like a missing row. Detail
//! operations return `Option`/`bool` and the handler layer turns `None`
//! into a 404.

use sqlx::PgPool;
use tareas_core::color::random_color;
use tareas_core::tasks::TaskState;
use tareas_core::types::{DbId, Timestamp};

use crate::models::task::{CreateTask, TaskResponse, UpdateTask};

/// Joined projection selected by every query that returns tasks.
const META_COLUMNS: &str = "t.id, t.title, t.description, t.category_id, \
     c.name AS category_name, t.state, t.color, t.owner_id, \
     u.username AS owner_username, t.created_at, t.updated_at, t.finalized_at";

/// Joins resolving the category name and owner username.
const META_JOINS: &str =
    "JOIN categories c ON c.id = t.category_id JOIN users u ON u.id = t.owner_id";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Check whether the owner already has a task with this color.
    pub async fn color_in_use(
        pool: &PgPool,
        owner_id: DbId,
        color: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tasks WHERE owner_id = $1 AND color = $2)",
        )
        .bind(owner_id)
        .bind(color)
        .fetch_one(pool)
        .await
    }

    /// Draw colors until one unused by this owner is found.
    ///
    /// The check-then-insert sequence is not serialized against concurrent
    /// creations for the same owner, so uniqueness is best-effort. With a
    /// 24-bit color space the expected number of draws stays at ~1 until an
    /// owner has millions of tasks.
    pub async fn assign_color(pool: &PgPool, owner_id: DbId) -> Result<String, sqlx::Error> {
        loop {
            let candidate = random_color();
            if !Self::color_in_use(pool, owner_id, &candidate).await? {
                return Ok(candidate);
            }
        }
    }

    /// Insert a new task, returning the created row with joined metadata.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<TaskResponse, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                INSERT INTO tasks (title, description, category_id, color, owner_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {META_COLUMNS} FROM t {META_JOINS}"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.color)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find one of the owner's tasks by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<TaskResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM tasks t {META_JOINS}
             WHERE t.owner_id = $1 AND t.id = $2"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all of the owner's tasks.
    pub async fn count_all(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Count the owner's tasks in one state.
    pub async fn count_by_state(
        pool: &PgPool,
        owner_id: DbId,
        state: TaskState,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE owner_id = $1 AND state = $2",
        )
        .bind(owner_id)
        .bind(state.as_str())
        .fetch_one(pool)
        .await
    }

    /// Count the owner's tasks in one category.
    pub async fn count_by_category(
        pool: &PgPool,
        owner_id: DbId,
        category_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE owner_id = $1 AND category_id = $2",
        )
        .bind(owner_id)
        .bind(category_id)
        .fetch_one(pool)
        .await
    }

    /// One page of the owner's tasks, newest first.
    pub async fn list_page(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TaskResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM tasks t {META_JOINS}
             WHERE t.owner_id = $1
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of the owner's tasks in one state.
    ///
    /// Pending tasks are ordered by creation time, finalized tasks by
    /// finalization time, both newest first.
    pub async fn list_by_state_page(
        pool: &PgPool,
        owner_id: DbId,
        state: TaskState,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TaskResponse>, sqlx::Error> {
        let order = match state {
            TaskState::Pending => "t.created_at DESC, t.id DESC",
            TaskState::Finalized => "t.finalized_at DESC, t.id DESC",
        };
        let query = format!(
            "SELECT {META_COLUMNS} FROM tasks t {META_JOINS}
             WHERE t.owner_id = $1 AND t.state = $2
             ORDER BY {order}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(state.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of the owner's tasks in one category, newest first.
    pub async fn list_by_category_page(
        pool: &PgPool,
        owner_id: DbId,
        category_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TaskResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM tasks t {META_JOINS}
             WHERE t.owner_id = $1 AND t.category_id = $2
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a task's editable fields. Only non-`None` fields in `input`
    /// are applied; state, color, owner, and timestamps are untouched.
    ///
    /// Returns `None` if the owner has no task with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<TaskResponse>, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                UPDATE tasks SET
                    title = COALESCE($3, title),
                    description = COALESCE($4, description),
                    category_id = COALESCE($5, category_id)
                WHERE owner_id = $1 AND id = $2
                RETURNING *
             )
             SELECT {META_COLUMNS} FROM t {META_JOINS}"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a state transition: `state` and `finalized_at` change in one
    /// UPDATE, nothing else does.
    ///
    /// Returns `None` if the owner has no task with the given `id`.
    pub async fn set_state(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        state: TaskState,
        finalized_at: Option<Timestamp>,
    ) -> Result<Option<TaskResponse>, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                UPDATE tasks SET state = $3, finalized_at = $4
                WHERE owner_id = $1 AND id = $2
                RETURNING *
             )
             SELECT {META_COLUMNS} FROM t {META_JOINS}"
        );
        sqlx::query_as::<_, TaskResponse>(&query)
            .bind(owner_id)
            .bind(id)
            .bind(state.as_str())
            .bind(finalized_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the owner's tasks. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
