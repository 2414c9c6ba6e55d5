//! Query parameter types used by more than one handler module.

use serde::Deserialize;

/// Generic pagination parameters (`?page=`).
///
/// Used by any handler that supports paginated listing. Pages are 1-based;
/// a missing `page` means the first page. Out-of-range pages are rejected
/// by `page_window` in the core crate.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}
