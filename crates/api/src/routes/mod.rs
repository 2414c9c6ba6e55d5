pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/token/refresh              refresh (public)
/// /auth/logout                     logout (requires auth)
///
/// /categorias                      list, create
/// /categorias/{id}                 get, rename (PUT/PATCH), delete
///
/// /tareas                          list, create
/// /tareas/pendientes               pending tasks
/// /tareas/finalizadas              finalized tasks
/// /tareas/categoria/{categoria_id} tasks in one category
/// /tareas/{id}                     get, update (PUT/PATCH), delete
/// /tareas/{id}/estado              state transition (PATCH)
/// ```
///
/// Everything except `/auth/register`, `/auth/login`, and
/// `/auth/token/refresh` requires a Bearer access token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Shared category catalog.
        .nest("/categorias", categories::router())
        // Owner-scoped tasks.
        .nest("/tareas", tasks::router())
}
