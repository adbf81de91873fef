//! Category types and the filter/option projection.

use serde::{Deserialize, Serialize};

/// Display title used when the API returns a category without one.
pub const UNNAMED_CATEGORY: &str = "Unnamed Category";

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: u64,
    /// Category title.
    pub title: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Create a category from a possibly missing title.
    pub fn with_fallback_title(id: u64, title: Option<String>) -> Self {
        Self {
            id,
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNNAMED_CATEGORY.to_string()),
        }
    }

    /// Project this category into its filter/option shape.
    pub fn to_filter(&self) -> CategoryFilter {
        CategoryFilter {
            key: self.id.to_string(),
            title: self.title.clone(),
            category_id: self.id,
        }
    }
}

/// A selected category filter.
///
/// Doubles as the dropdown option shape and as the URL-encodable filter
/// token; `key` is the stringified category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Stable option key.
    pub key: String,
    /// Display title.
    pub title: String,
    /// The category this filter selects.
    pub category_id: u64,
}

impl From<&Category> for CategoryFilter {
    fn from(category: &Category) -> Self {
        category.to_filter()
    }
}

/// Project a category list into dropdown options.
pub fn category_options(categories: &[Category]) -> Vec<CategoryFilter> {
    categories.iter().map(Category::to_filter).collect()
}

/// Resolve raw category ids against the loaded category list.
///
/// Ids with no matching category are silently dropped. The result follows
/// the order of `categories`, not of `ids`.
pub fn filters_for_ids(categories: &[Category], ids: &[u64]) -> Vec<CategoryFilter> {
    categories
        .iter()
        .filter(|category| ids.contains(&category.id))
        .map(Category::to_filter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_title() {
        let named = Category::with_fallback_title(1, Some("Clothes".to_string()));
        assert_eq!(named.title, "Clothes");

        let missing = Category::with_fallback_title(2, None);
        assert_eq!(missing.title, UNNAMED_CATEGORY);

        let empty = Category::with_fallback_title(3, Some(String::new()));
        assert_eq!(empty.title, UNNAMED_CATEGORY);
    }

    #[test]
    fn test_filter_projection() {
        let category = Category::new(7, "Shoes");
        let filter = category.to_filter();

        assert_eq!(filter.key, "7");
        assert_eq!(filter.title, "Shoes");
        assert_eq!(filter.category_id, 7);
    }

    #[test]
    fn test_filters_for_ids_drops_unknown() {
        let categories = vec![
            Category::new(2, "Clothes"),
            Category::new(5, "Shoes"),
            Category::new(9, "Hats"),
        ];

        let filters = filters_for_ids(&categories, &[5, 2, 42]);
        let ids: Vec<u64> = filters.iter().map(|f| f.category_id).collect();

        // Unknown id 42 dropped; order follows the category list.
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_category_options() {
        let categories = vec![Category::new(1, "A"), Category::new(2, "B")];
        let options = category_options(&categories);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].key, "1");
        assert_eq!(options[1].title, "B");
    }
}
