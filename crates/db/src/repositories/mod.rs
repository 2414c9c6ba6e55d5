//! Repository layer.
//!
//! Repositories are zero-sized structs whose async methods take `&PgPool`
//! as their first argument, leaving transaction and pooling decisions to
//! the caller.

pub mod category_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
