//! Domain policies for the tareas backend.
//!
//! This crate holds the pure, database-free rules of the system: task
//! lifecycle states, color generation and validation, category naming
//! and the default seed list, and pagination window math. Everything here
//! is computed against data passed in by the caller so the policies can be
//! unit-tested without a database or an HTTP stack.

pub mod categories;
pub mod color;
pub mod error;
pub mod pagination;
pub mod tasks;
pub mod types;
