//! Handlers for the `/categorias` resource.
//!
//! Categories are shared: any authenticated user may list, create, rename,
//! or delete any category, and the reported `task_count` spans all owners.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tareas_core::categories::validate_category_name;
use tareas_core::error::CoreError;
use tareas_core::types::DbId;
use tareas_db::models::category::CategoryWithCount;
use tareas_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/categorias
///
/// All categories ordered by name, as a plain array (not paginated).
pub async fn list(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<CategoryWithCount>>> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categorias
pub async fn create(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryWithCount>)> {
    let name = validated_name(&state, &input.name, None).await?;
    let category = CategoryRepo::create(&state.pool, &name).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    // A freshly created category cannot have tasks yet.
    let response = CategoryWithCount {
        id: category.id,
        name: category.name,
        created_at: category.created_at,
        task_count: 0,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/categorias/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CategoryWithCount>> {
    let category = CategoryRepo::find_with_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// PUT/PATCH /api/categorias/{id}
///
/// A category has a single editable field, so full and partial updates
/// coincide.
pub async fn update(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<Json<CategoryWithCount>> {
    let name = validated_name(&state, &input.name, Some(id)).await?;
    CategoryRepo::update_name(&state.pool, id, &name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    // Re-read with the count so the response shape matches the listing.
    let category = CategoryRepo::find_with_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/categorias/{id}
///
/// Deletes the category and, via the FK cascade, every task in it.
pub async fn delete(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Trim and validate a category name, rejecting duplicates.
///
/// `exclude_id` carries the category being renamed so renaming a category to
/// its current name is allowed.
async fn validated_name(
    state: &AppState,
    raw: &str,
    exclude_id: Option<DbId>,
) -> AppResult<String> {
    let name = raw.trim();
    validate_category_name(name)?;

    if let Some(existing) = CategoryRepo::find_by_name(&state.pool, name).await? {
        if exclude_id != Some(existing.id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "A category named '{name}' already exists"
            ))));
        }
    }

    Ok(name.to_string())
}
