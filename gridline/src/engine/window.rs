//! Pagination and the virtualization window.

use crate::row::GridRow;

/// Default number of rows rendered beyond each edge of the viewport.
pub const DEFAULT_ROW_BUFFER: usize = 5;

/// The slice of rows for one page. Out-of-range pages yield an empty slice.
pub fn paginate_rows<'r, 'a, T>(
    rows: &'r [GridRow<'a, T>],
    page_index: usize,
    page_size: usize,
) -> &'r [GridRow<'a, T>] {
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages for `row_count` rows, never less than one.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    row_count.div_ceil(page_size).max(1)
}

/// Half-open range of row indices to materialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// The rows to render for a scroll position.
///
/// Over-renders `buffer` rows above and below the viewport. The window holds
/// at most `ceil(viewport_height / row_height) + 2 * buffer` rows and always
/// satisfies `start <= end <= row_count`.
pub fn visible_range(
    scroll_top: f64,
    viewport_height: f64,
    row_height: f64,
    row_count: usize,
    buffer: usize,
) -> VisibleRange {
    if !(row_height > 0.0 && row_height.is_finite()) {
        return VisibleRange::default();
    }
    let first = (scroll_top.max(0.0) / row_height).floor() as usize;
    let start = first.saturating_sub(buffer).min(row_count);
    let capacity =
        (viewport_height.max(0.0) / row_height).ceil() as usize + buffer.saturating_mul(2);
    let end = start.saturating_add(capacity).min(row_count);
    VisibleRange { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_guards_row_height() {
        assert_eq!(visible_range(100.0, 400.0, 0.0, 10, 5), VisibleRange::default());
        assert_eq!(visible_range(-50.0, 80.0, 40.0, 100, 0), VisibleRange { start: 0, end: 2 });
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(40, 25), 2);
        assert_eq!(total_pages(50, 25), 2);
        assert_eq!(total_pages(51, 25), 3);
    }
}
