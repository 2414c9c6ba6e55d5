//! Response envelope types used by more than one handler module.
//!
//! Paginated list endpoints wrap their results in the [`Paginated`] envelope.
//! Use it instead of ad-hoc `serde_json::json!` maps to get compile-time
//! type safety and consistent serialization.

use serde::Serialize;

/// Standard pagination envelope for list endpoints.
///
/// `next` and `previous` hold 1-based page numbers, or `null` when there is
/// no page in that direction. `count` is the total number of rows matching
/// the listing before pagination was applied.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Paginated { count, next: window.next, previous: window.previous, results }))
/// ```
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<T>,
}
