//! Pagination derivation over an already-filtered result set.

use serde::{Deserialize, Serialize};

/// Number of products shown per page.
pub const PRODUCTS_PER_PAGE: usize = 9;

/// Pagination info derived from a page number and a result-set length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages: `ceil(total / per_page)`.
    pub total_pages: u32,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Derive pagination info. `per_page` of zero is treated as one.
    pub fn new(page: u32, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = (total.div_ceil(per_page)) as u32;

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Offset of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1)) as usize * self.per_page
    }

    /// Check if on the first page.
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    /// Check if on the last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Page numbers for display, at most `max_visible`, centered on the
    /// current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = (max_visible / 2) as u32;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible as u32 - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible as u32).max(1);

        (start..=end).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, PRODUCTS_PER_PAGE, 0)
    }
}

/// Slice out the current page: indices `[(page-1)*per_page, page*per_page)`
/// clipped to the item count.
pub fn page_slice<T>(items: &[T], page: u32, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = (page.saturating_sub(1)) as usize * per_page;
    let end = (start + per_page).min(items.len());
    let start = start.min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 9, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 9, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 9, 9).total_pages, 1);
        assert_eq!(Pagination::new(1, 9, 10).total_pages, 2);
        assert_eq!(Pagination::new(1, 9, 20).total_pages, 3);
    }

    #[test]
    fn test_prev_next_flags() {
        let first = Pagination::new(1, 9, 45);
        assert!(!first.has_prev);
        assert!(first.has_next);
        assert!(first.is_first());

        let middle = Pagination::new(3, 9, 45);
        assert!(middle.has_prev);
        assert!(middle.has_next);

        let last = Pagination::new(5, 9, 45);
        assert!(last.has_prev);
        assert!(!last.has_next);
        assert!(last.is_last());
    }

    #[test]
    fn test_page_numbers_window() {
        let p = Pagination::new(5, 9, 90);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let small = Pagination::new(1, 9, 20);
        assert_eq!(small.page_numbers(5), vec![1, 2, 3]);

        let edge = Pagination::new(1, 9, 90);
        assert_eq!(edge.page_numbers(5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_slice_covers_expected_indices() {
        let items: Vec<u32> = (0..20).collect();

        assert_eq!(page_slice(&items, 1, 9), &items[0..9]);
        assert_eq!(page_slice(&items, 2, 9), &items[9..18]);
        assert_eq!(page_slice(&items, 3, 9), &items[18..20]);
    }

    #[test]
    fn test_page_slice_clips_out_of_range() {
        let items: Vec<u32> = (0..4).collect();

        assert!(page_slice(&items, 7, 9).is_empty());
        assert!(page_slice::<u32>(&[], 1, 9).is_empty());
    }

    #[test]
    fn test_slice_length_never_exceeds_page_size() {
        let items: Vec<u32> = (0..25).collect();
        for page in 1..6 {
            assert!(page_slice(&items, page, 9).len() <= 9);
        }
    }
}
