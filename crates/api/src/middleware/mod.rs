//! Request-level extractors.
//!
//! - [`auth::AuthUser`] -- resolves the caller's identity from the Bearer
//!   access token before a protected handler runs.

pub mod auth;
