//! Display-side pagination over an already collected record list.

use crate::error::PaginationError;

/// Returns the slice of `items` for the 1-based `page` and the total page count.
///
/// `page` is clamped into `1..=total_pages`, so asking for page 0 yields the
/// first page and asking past the end yields the last one. An empty input
/// yields an empty slice and zero pages.
///
/// # Errors
///
/// Returns [`PaginationError::ZeroPageSize`] when `page_size` is zero.
pub fn paginate<T>(
    items: &[T],
    page: usize,
    page_size: usize,
) -> Result<(&[T], usize), PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::ZeroPageSize);
    }
    if items.is_empty() {
        return Ok((&[], 0));
    }

    let total_pages = items.len().div_ceil(page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok((&items[start..end], total_pages))
}
