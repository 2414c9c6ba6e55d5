//! Handlers for the `/tareas` resource.
//!
//! Every operation here is scoped to the authenticated owner: the repository
//! filters on `owner_id` in SQL, so someone else's task id behaves exactly
//! like a missing one and surfaces as a 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tareas_core::error::CoreError;
use tareas_core::pagination::page_window;
use tareas_core::tasks::{transition_finalized_at, validate_title, TaskState, TASK_PAGE_SIZE};
use tareas_core::types::DbId;
use tareas_db::models::task::{CreateTask, TaskResponse, UpdateTask};
use tareas_db::repositories::{CategoryRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Paginated;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tareas`.
///
/// State, color, and owner are assigned server-side and are not accepted
/// from the client.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub category_id: DbId,
}

/// Request body for `PATCH /tareas/{id}/estado`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStateRequest {
    pub state: String,
}

// ---------------------------------------------------------------------------
// Listing handlers
// ---------------------------------------------------------------------------

/// GET /api/tareas
///
/// The requester's tasks, newest first, paginated.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<TaskResponse>>> {
    let count = TaskRepo::count_all(&state.pool, auth_user.user_id).await?;
    let window = page_window(count, params.page.unwrap_or(1), TASK_PAGE_SIZE)?;
    let results = TaskRepo::list_page(
        &state.pool,
        auth_user.user_id,
        TASK_PAGE_SIZE,
        window.offset,
    )
    .await?;
    Ok(Json(Paginated {
        count,
        next: window.next,
        previous: window.previous,
        results,
    }))
}

/// GET /api/tareas/pendientes
///
/// The requester's pending tasks, newest first, paginated.
pub async fn list_pending(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<TaskResponse>>> {
    list_by_state_inner(&state, auth_user.user_id, TaskState::Pending, params).await
}

/// GET /api/tareas/finalizadas
///
/// The requester's finalized tasks, most recently finalized first, paginated.
pub async fn list_finalized(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<TaskResponse>>> {
    list_by_state_inner(&state, auth_user.user_id, TaskState::Finalized, params).await
}

/// GET /api/tareas/categoria/{categoria_id}
///
/// The requester's tasks in one category, newest first, paginated. An
/// unknown category id yields an empty page rather than an error.
pub async fn list_by_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(categoria_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<TaskResponse>>> {
    let count = TaskRepo::count_by_category(&state.pool, auth_user.user_id, categoria_id).await?;
    let window = page_window(count, params.page.unwrap_or(1), TASK_PAGE_SIZE)?;
    let results = TaskRepo::list_by_category_page(
        &state.pool,
        auth_user.user_id,
        categoria_id,
        TASK_PAGE_SIZE,
        window.offset,
    )
    .await?;
    Ok(Json(Paginated {
        count,
        next: window.next,
        previous: window.previous,
        results,
    }))
}

// ---------------------------------------------------------------------------
// Detail handlers
// ---------------------------------------------------------------------------

/// POST /api/tareas
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let title = input.title.trim().to_string();
    validate_title(&title)?;
    ensure_category_exists(&state, input.category_id).await?;

    let color = TaskRepo::assign_color(&state.pool, auth_user.user_id).await?;

    let create = CreateTask {
        title,
        description: input.description,
        category_id: input.category_id,
        color,
        owner_id: auth_user.user_id,
    };
    let task = TaskRepo::create(&state.pool, &create).await?;

    tracing::info!(task_id = task.id, owner_id = task.owner_id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tareas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    let task = TaskRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT/PATCH /api/tareas/{id}
///
/// Updates `title`, `description`, and/or `category_id`. Omitted fields are
/// left unchanged; `state`, `color`, owner, and timestamps are not writable
/// through this path.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    if let Some(title) = input.title.as_deref() {
        let trimmed = title.trim().to_string();
        validate_title(&trimmed)?;
        input.title = Some(trimmed);
    }
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let task = TaskRepo::update(&state.pool, auth_user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PATCH /api/tareas/{id}/estado
///
/// Applies the lifecycle policy: finalizing a pending task stamps
/// `finalized_at`, re-finalizing keeps the original timestamp, and moving
/// back to pending clears it. Returns the full updated task.
pub async fn set_state(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStateRequest>,
) -> AppResult<Json<TaskResponse>> {
    let new_state = TaskState::from_str_value(&input.state)?;

    let current = TaskRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    // The CHECK constraint keeps stored states valid; a parse failure here
    // is data corruption, not caller error.
    let current_state = TaskState::from_str_value(&current.state)
        .map_err(|_| AppError::InternalError(format!("Task {id} has an invalid stored state")))?;

    let finalized_at =
        transition_finalized_at(current_state, current.finalized_at, new_state, Utc::now());

    let task = TaskRepo::set_state(&state.pool, auth_user.user_id, id, new_state, finalized_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(task_id = id, state = new_state.as_str(), "Task state changed");

    Ok(Json(task))
}

/// DELETE /api/tareas/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// One page of the owner's tasks in the given state.
async fn list_by_state_inner(
    state: &AppState,
    owner_id: DbId,
    task_state: TaskState,
    params: PageParams,
) -> AppResult<Json<Paginated<TaskResponse>>> {
    let count = TaskRepo::count_by_state(&state.pool, owner_id, task_state).await?;
    let window = page_window(count, params.page.unwrap_or(1), TASK_PAGE_SIZE)?;
    let results = TaskRepo::list_by_state_page(
        &state.pool,
        owner_id,
        task_state,
        TASK_PAGE_SIZE,
        window.offset,
    )
    .await?;
    Ok(Json(Paginated {
        count,
        next: window.next,
        previous: window.previous,
        results,
    }))
}

/// Reject task writes that point at a category that does not exist.
///
/// Distinct from the FK error so the caller gets a 400 naming the field
/// instead of a 500.
async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "category_id {category_id} does not reference an existing category"
        ))));
    }
    Ok(())
}
