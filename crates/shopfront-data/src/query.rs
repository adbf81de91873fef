//! Builder for product-list queries against the catalog API.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt::Write;

/// Characters escaped in query-string values.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a query-string value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// A query against the products endpoint.
///
/// Always expands the image and category relations; optionally narrows by a
/// case-insensitive title-contains filter and a category-id set filter
/// (OR'd via an indexed `$in` array).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Title search text. Whitespace-only text adds no filter.
    pub search: String,
    /// Category ids to match, in selection order.
    pub category_ids: Vec<u64>,
}

impl ProductQuery {
    /// Create an unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the category-id filter set.
    pub fn with_categories(mut self, category_ids: Vec<u64>) -> Self {
        self.category_ids = category_ids;
        self
    }

    /// Render the query string the API expects.
    pub fn to_query_string(&self) -> String {
        let mut qs = String::from("populate[0]=images&populate[1]=productCategory");

        let search = self.search.trim();
        if !search.is_empty() {
            let _ = write!(
                qs,
                "&filters[title][$containsi]={}",
                encode_value(search)
            );
        }

        for (index, id) in self.category_ids.iter().enumerate() {
            let _ = write!(qs, "&filters[productCategory][id][$in][{index}]={id}");
        }

        qs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query() {
        let qs = ProductQuery::new().to_query_string();
        assert_eq!(qs, "populate[0]=images&populate[1]=productCategory");
    }

    #[test]
    fn test_search_filter() {
        let qs = ProductQuery::new().with_search("shirt").to_query_string();
        assert!(qs.contains("filters[title][$containsi]=shirt"));
    }

    #[test]
    fn test_search_is_encoded() {
        let qs = ProductQuery::new()
            .with_search("red & blue shirt")
            .to_query_string();
        assert!(qs.contains("filters[title][$containsi]=red%20%26%20blue%20shirt"));
    }

    #[test]
    fn test_whitespace_search_adds_no_filter() {
        let qs = ProductQuery::new().with_search("   ").to_query_string();
        assert!(!qs.contains("$containsi"));
    }

    #[test]
    fn test_category_in_filter_is_indexed() {
        let qs = ProductQuery::new()
            .with_categories(vec![2, 5])
            .to_query_string();
        assert!(qs.contains("filters[productCategory][id][$in][0]=2"));
        assert!(qs.contains("filters[productCategory][id][$in][1]=5"));
    }

    #[test]
    fn test_combined_filters() {
        let qs = ProductQuery::new()
            .with_search("hat")
            .with_categories(vec![9])
            .to_query_string();
        assert!(qs.starts_with("populate[0]=images&populate[1]=productCategory"));
        assert!(qs.contains("$containsi]=hat"));
        assert!(qs.contains("$in][0]=9"));
    }
}
