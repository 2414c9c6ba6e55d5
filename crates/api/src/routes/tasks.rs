//! Route definitions for the `/tareas` resource.
//!
//! The literal segments (`/pendientes`, `/finalizadas`, `/categoria/…`) are
//! registered alongside `/{id}`; Axum matches literal segments before path
//! parameters, so they never collide with a task id.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tareas`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /pendientes                  -> list_pending
/// GET    /finalizadas                 -> list_finalized
/// GET    /categoria/{categoria_id}    -> list_by_category
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// PATCH  /{id}                        -> update
/// DELETE /{id}                        -> delete
/// PATCH  /{id}/estado                 -> set_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/pendientes", get(tasks::list_pending))
        .route("/finalizadas", get(tasks::list_finalized))
        .route("/categoria/{categoria_id}", get(tasks::list_by_category))
        .route(
            "/{id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .patch(tasks::update)
                .delete(tasks::delete),
        )
        .route("/{id}/estado", patch(tasks::set_state))
}
