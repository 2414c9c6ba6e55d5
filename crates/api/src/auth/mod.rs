//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and strength checks.
//! - [`jwt`] -- access-token signing and validation plus the refresh-token
//!   digest scheme.

pub mod jwt;
pub mod password;
