//! Data access layer for the remote catalog API.
//!
//! This crate provides:
//! - `CatalogApi` - the API collaborator trait the stores depend on
//! - `HttpCatalogClient` - reqwest-backed implementation with a list-fetch
//!   timeout
//! - `ProductQuery` - builder for the API's filter query syntax
//! - `FetchError` - fetch error taxonomy

mod client;
mod error;
mod query;

pub use client::*;
pub use error::*;
pub use query::*;

use async_trait::async_trait;
use shopfront_catalog::{Category, Product};

/// The remote catalog API, as seen by the stores.
///
/// Implementations are expected to apply search and category filtering
/// server-side; the stores only re-slice results for pagination.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the product list matching `query`.
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError>;

    /// Fetch a single product by identifier.
    ///
    /// `Ok(None)` is the not-found branch: a valid response with no
    /// matching record.
    async fn fetch_product(&self, id: u64) -> Result<Option<Product>, FetchError>;

    /// Fetch the category list.
    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError>;
}
