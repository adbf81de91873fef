//! Catalog domain types and derivations for Shopfront.
//!
//! This crate holds the plain data model the rest of the workspace moves
//! around:
//!
//! - **Products**: list items, detail items, images with a display-url
//!   resolution policy, related-item derivation
//! - **Categories**: the category list and its filter/option projection
//! - **Query state**: the (search text, selected filters, page) tuple that
//!   fully determines what is fetched and displayed
//! - **Pagination**: page slicing and page-count derivation over an
//!   already-filtered result set

pub mod category;
pub mod pagination;
pub mod product;
pub mod query;

pub use category::{category_options, filters_for_ids, Category, CategoryFilter, UNNAMED_CATEGORY};
pub use pagination::{page_slice, Pagination, PRODUCTS_PER_PAGE};
pub use product::{
    primary_image_url, related_items, ImageFormats, ImageSource, Product, ProductImage,
    RelatedProduct, PLACEHOLDER_IMAGE_URL, RELATED_ITEMS_LIMIT,
};
pub use query::QueryState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::category::{category_options, filters_for_ids, Category, CategoryFilter};
    pub use crate::pagination::{page_slice, Pagination, PRODUCTS_PER_PAGE};
    pub use crate::product::{
        primary_image_url, related_items, Product, ProductImage, RelatedProduct,
        PLACEHOLDER_IMAGE_URL,
    };
    pub use crate::query::QueryState;
}
