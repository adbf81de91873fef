//! Query state: the tuple that determines what is fetched and displayed.

use crate::category::CategoryFilter;
use serde::{Deserialize, Serialize};

/// Search text, selected filters, and current page.
///
/// Invariant: `page` is at least 1, and resets to 1 whenever the search
/// text or the filter set changes through [`QueryState::apply_search`] or
/// [`QueryState::apply_filters`]. Page-only navigation never touches the
/// other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    /// Current search text (the raw input value).
    pub search_text: String,
    /// Selected category filters, in selection order.
    pub filters: Vec<CategoryFilter>,
    /// Current page, 1-indexed.
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: Vec::new(),
            page: 1,
        }
    }
}

impl QueryState {
    /// Create the default query state: empty search, no filters, page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a search: trims the text and resets to page 1.
    pub fn apply_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into().trim().to_string();
        self.page = 1;
    }

    /// Replace the filter set and reset to page 1.
    pub fn apply_filters(&mut self, filters: Vec<CategoryFilter>) {
        self.filters = filters;
        self.page = 1;
    }

    /// Navigate to a page. Clamped to at least 1; no other field changes.
    pub fn apply_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Category ids extracted from the selected filters.
    pub fn category_ids(&self) -> Vec<u64> {
        self.filters.iter().map(|f| f.category_id).collect()
    }

    /// Whether search text or filters narrow the result set.
    pub fn has_criteria(&self) -> bool {
        !self.search_text.is_empty() || !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_default_state() {
        let state = QueryState::new();
        assert_eq!(state.search_text, "");
        assert!(state.filters.is_empty());
        assert_eq!(state.page, 1);
        assert!(!state.has_criteria());
    }

    #[test]
    fn test_search_trims_and_resets_page() {
        let mut state = QueryState::new();
        state.apply_page(4);
        state.apply_search("  shirt  ");

        assert_eq!(state.search_text, "shirt");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_filters_reset_page() {
        let mut state = QueryState::new();
        state.apply_page(3);
        state.apply_filters(vec![Category::new(2, "Clothes").to_filter()]);

        assert_eq!(state.page, 1);
        assert_eq!(state.category_ids(), vec![2]);
        assert!(state.has_criteria());
    }

    #[test]
    fn test_page_only_navigation() {
        let mut state = QueryState::new();
        state.apply_search("shirt");
        state.apply_page(5);

        assert_eq!(state.page, 5);
        assert_eq!(state.search_text, "shirt");

        state.apply_page(0);
        assert_eq!(state.page, 1);
    }
}
