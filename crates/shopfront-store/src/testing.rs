//! In-memory catalog API for tests.
//!
//! Filters the way the real server would (case-insensitive title contains,
//! category-id set membership) and counts calls per endpoint, so tests can
//! assert both results and fetch behavior.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use shopfront_catalog::{Category, Product};
use shopfront_data::{CatalogApi, FetchError, ProductQuery};

/// In-memory [`CatalogApi`] implementation.
#[derive(Default)]
pub struct FakeCatalogApi {
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    fail_products: AtomicBool,
    fail_product: AtomicBool,
    fail_categories: AtomicBool,
    product_list_calls: AtomicUsize,
    product_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

impl FakeCatalogApi {
    /// Create an empty fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the product catalog.
    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().unwrap_or_else(PoisonError::into_inner) = products;
        self
    }

    /// Seed the category list.
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self
            .categories
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = categories;
        self
    }

    /// Replace the product catalog mid-test.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock().unwrap_or_else(PoisonError::into_inner) = products;
    }

    /// Make product-list fetches fail.
    pub fn fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }

    /// Make single-product fetches fail.
    pub fn fail_product(&self, fail: bool) {
        self.fail_product.store(fail, Ordering::SeqCst);
    }

    /// Make category fetches fail.
    pub fn fail_categories(&self, fail: bool) {
        self.fail_categories.store(fail, Ordering::SeqCst);
    }

    /// Number of product-list fetches issued.
    pub fn product_list_calls(&self) -> usize {
        self.product_list_calls.load(Ordering::SeqCst)
    }

    /// Number of single-product fetches issued.
    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    /// Number of category fetches issued.
    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    fn connection_error() -> FetchError {
        FetchError::Connection("fake api offline".to_string())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalogApi {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        self.product_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(Self::connection_error());
        }

        let search = query.search.trim().to_lowercase();
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products
            .iter()
            .filter(|product| {
                let title_matches =
                    search.is_empty() || product.title.to_lowercase().contains(&search);
                let category_matches = query.category_ids.is_empty()
                    || query.category_ids.contains(&product.category.id);
                title_matches && category_matches
            })
            .cloned()
            .collect())
    }

    async fn fetch_product(&self, id: u64) -> Result<Option<Product>, FetchError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_product.load(Ordering::SeqCst) {
            return Err(Self::connection_error());
        }

        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products.iter().find(|product| product.id == id).cloned())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_categories.load(Ordering::SeqCst) {
            return Err(Self::connection_error());
        }

        let categories = self
            .categories
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(categories.clone())
    }
}
