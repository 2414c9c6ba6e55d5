//! Tareas API server library.
//!
//! Everything the server is made of lives here -- config, state, errors,
//! auth, routes -- so the `tareas-api` and `init-categorias` binaries and
//! the integration tests all build on the same modules.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
