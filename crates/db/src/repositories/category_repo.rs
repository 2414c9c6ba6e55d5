//! Repository for the `categories` table.
//!
//! Categories are not owner-scoped; every method operates on the shared
//! global set.

use sqlx::PgPool;
use tareas_core::categories::DEFAULT_CATEGORY_NAMES;
use tareas_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, SeedReport};

/// Bare-row column list, interpolated into every single-table query.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Joined projection with the per-category task count.
const COUNT_COLUMNS: &str = "c.id, c.name, c.created_at, COUNT(t.id) AS task_count";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by ID together with its task count.
    pub async fn find_with_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNT_COLUMNS}
             FROM categories c
             LEFT JOIN tasks t ON t.category_id = c.id
             WHERE c.id = $1
             GROUP BY c.id"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name, each with its task count
    /// (tasks of every owner, not just the requester's).
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNT_COLUMNS}
             FROM categories c
             LEFT JOIN tasks t ON t.category_id = c.id
             GROUP BY c.id
             ORDER BY c.name ASC"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .fetch_all(pool)
            .await
    }

    /// Rename a category. `None` means the id matched no row.
    pub async fn update_name(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("UPDATE categories SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Referencing tasks are removed by the FK cascade.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Idempotently insert the default category names.
    ///
    /// Safe to run any number of times; names already present are left
    /// untouched and counted as existing.
    pub async fn seed_defaults(pool: &PgPool) -> Result<SeedReport, sqlx::Error> {
        let mut report = SeedReport {
            created: 0,
            existing: 0,
        };

        let insert = "INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING";
        for name in DEFAULT_CATEGORY_NAMES {
            let result = sqlx::query(insert).bind(name).execute(pool).await?;

            if result.rows_affected() > 0 {
                tracing::debug!(name, "Default category created");
                report.created += 1;
            } else {
                tracing::debug!(name, "Default category already present");
                report.existing += 1;
            }
        }

        Ok(report)
    }
}
