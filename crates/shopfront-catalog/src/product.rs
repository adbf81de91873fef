//! Product types, image resolution, and related-item derivation.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Fallback image shown when a product carries no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder-image.jpg";

/// Maximum number of related items shown on the detail page.
pub const RELATED_ITEMS_LIMIT: usize = 3;

/// A single alternate-resolution rendition of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// URL of this rendition.
    pub url: String,
}

/// Alternate resolutions produced by the media pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageSource>,
}

/// A product image: a primary URL plus optional alternate resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Primary URL.
    pub url: String,
    /// Alternate resolutions, when the media pipeline produced them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<ImageFormats>,
}

impl ProductImage {
    /// Create an image with only a primary URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            formats: None,
        }
    }

    /// Resolve the URL to display: the large rendition when present,
    /// otherwise the primary URL.
    pub fn display_url(&self) -> &str {
        self.formats
            .as_ref()
            .and_then(|f| f.large.as_ref())
            .map(|src| src.url.as_str())
            .unwrap_or(&self.url)
    }
}

/// Resolve the display URL for a product's first image.
///
/// Products without images resolve to [`PLACEHOLDER_IMAGE_URL`].
pub fn primary_image_url(images: &[ProductImage]) -> &str {
    images
        .first()
        .map(ProductImage::display_url)
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
}

/// A product in the catalog.
///
/// Built from one API response item; immutable once stored and replaced
/// wholesale on the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: u64,
    /// Product title.
    pub title: String,
    /// Price in the catalog currency.
    pub price: f64,
    /// Free-text description.
    pub description: String,
    /// The category this product belongs to.
    pub category: Category,
    /// Product images in display order.
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Project into the related-items shape.
    pub fn to_related(&self) -> RelatedProduct {
        RelatedProduct {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            category_title: self.category.title.clone(),
            description: self.description.clone(),
            images: self.images.clone(),
        }
    }
}

/// Subset of [`Product`] shown in the detail page's related grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub category_title: String,
    pub description: String,
    pub images: Vec<ProductImage>,
}

/// Derive the related items for a product.
///
/// Candidates sharing the product's category title, excluding the product
/// itself, truncated to [`RELATED_ITEMS_LIMIT`] in the order the server
/// returned them.
pub fn related_items(target: &Product, candidates: &[Product]) -> Vec<RelatedProduct> {
    candidates
        .iter()
        .filter(|item| item.category.title == target.category.title && item.id != target.id)
        .take(RELATED_ITEMS_LIMIT)
        .map(Product::to_related)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price: 10.0 * id as f64,
            description: String::new(),
            category: Category::new(1, category),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_display_url_prefers_large() {
        let image = ProductImage {
            url: "/primary.jpg".to_string(),
            formats: Some(ImageFormats {
                large: Some(ImageSource {
                    url: "/large.jpg".to_string(),
                }),
                ..Default::default()
            }),
        };
        assert_eq!(image.display_url(), "/large.jpg");
    }

    #[test]
    fn test_display_url_falls_back_to_primary() {
        let image = ProductImage::new("/primary.jpg");
        assert_eq!(image.display_url(), "/primary.jpg");

        let medium_only = ProductImage {
            url: "/primary.jpg".to_string(),
            formats: Some(ImageFormats {
                medium: Some(ImageSource {
                    url: "/medium.jpg".to_string(),
                }),
                ..Default::default()
            }),
        };
        assert_eq!(medium_only.display_url(), "/primary.jpg");
    }

    #[test]
    fn test_primary_image_url_placeholder() {
        assert_eq!(primary_image_url(&[]), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            primary_image_url(&[ProductImage::new("/a.jpg")]),
            "/a.jpg"
        );
    }

    #[test]
    fn test_related_items_excludes_self_and_caps() {
        let target = product(42, "Shoes");
        let candidates = vec![
            product(42, "Shoes"),
            product(1, "Shoes"),
            product(2, "Hats"),
            product(3, "Shoes"),
            product(4, "Shoes"),
            product(5, "Shoes"),
        ];

        let related = related_items(&target, &candidates);

        assert_eq!(related.len(), RELATED_ITEMS_LIMIT);
        assert!(related.iter().all(|item| item.id != 42));
        // Server-returned order preserved.
        let ids: Vec<u64> = related.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_related_items_other_category_only() {
        let target = product(1, "Shoes");
        let candidates = vec![product(2, "Hats"), product(3, "Hats")];
        assert!(related_items(&target, &candidates).is_empty());
    }
}
