//! Page-number pagination over counted result sets.
//!
//! Listing endpoints return fixed-size pages addressed by a 1-based `page`
//! query parameter. The envelope carries `next`/`previous` page numbers so
//! clients never compute offsets themselves. This module turns a total row
//! count plus a requested page into the SQL offset and the neighbor links.

use crate::error::CoreError;

/// Offset and neighbor links for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// SQL offset of the first row on this page.
    pub offset: i64,
    /// Page number after this one, when it exists.
    pub next: Option<i64>,
    /// Page number before this one, when it exists.
    pub previous: Option<i64>,
}

/// Resolve a requested page against a total count.
///
/// Page numbers are 1-based. The first page always exists, even over an
/// empty set; any other page past the end is a not-found error, as is
/// page zero or a negative page. `page_size` must be positive.
///
/// # Examples
///
/// ```
/// use tareas_core::pagination::page_window;
///
/// let window = page_window(10, 1, 6).unwrap();
/// assert_eq!(window.offset, 0);
/// assert_eq!(window.next, Some(2));
/// assert_eq!(window.previous, None);
///
/// assert!(page_window(10, 3, 6).is_err());
/// ```
pub fn page_window(count: i64, page: i64, page_size: i64) -> Result<PageWindow, CoreError> {
    let num_pages = ((count + page_size - 1) / page_size).max(1);

    if page < 1 || page > num_pages {
        return Err(CoreError::NotFound {
            entity: "Page",
            id: page,
        });
    }

    Ok(PageWindow {
        offset: (page - 1) * page_size,
        next: (page < num_pages).then_some(page + 1),
        previous: (page > 1).then_some(page - 1),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
