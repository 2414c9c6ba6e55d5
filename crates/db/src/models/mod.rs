//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus the create/update DTOs its repository needs. Structs that are
//! serialized straight into API responses also derive `Serialize`.

pub mod category;
pub mod session;
pub mod task;
pub mod user;
