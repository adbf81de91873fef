//! The product-detail state container.
//!
//! `load_detail` fans out two concurrent fetches (the product itself and
//! the related-candidate list) and joins them before committing. Absence
//! of the product is the distinct not-found branch, not an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_catalog::{related_items, Product, RelatedProduct};
use shopfront_data::{CatalogApi, ProductQuery};

use crate::subscribe::{Subscribers, SubscriptionId};

/// Message shown when either detail fetch fails.
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load product data";

/// The single UI branch the detail view should render.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailViewState {
    /// Nothing requested yet.
    Idle,
    /// The detail lookup is in flight.
    Loading,
    /// Either concurrent fetch failed; offer a retry.
    Error(String),
    /// The fetch succeeded but no product matched the identifier.
    NotFound,
    /// Product and related items are available.
    Ready {
        product: Product,
        related: Vec<RelatedProduct>,
    },
}

#[derive(Debug, Default, Clone)]
struct DetailState {
    product: Option<Product>,
    related: Vec<RelatedProduct>,
    is_loading: bool,
    error: Option<String>,
    not_found: bool,
}

/// Session-lifetime store for the product-detail view.
pub struct ProductStore {
    api: Arc<dyn CatalogApi>,
    state: Mutex<DetailState>,
    fetch_seq: AtomicU64,
    subscribers: Subscribers,
}

impl ProductStore {
    /// Create a store over the given API collaborator.
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            state: Mutex::new(DetailState::default()),
            fetch_seq: AtomicU64::new(0),
            subscribers: Subscribers::new(),
        }
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Remove a change listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Load a product and its related items.
    ///
    /// An absent identifier is a no-op: no request, no error. Retry is a
    /// re-invocation with the same identifier.
    pub async fn load_detail(&self, id: Option<u64>) {
        let Some(id) = id else {
            return;
        };

        let token = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock_state();
            state.is_loading = true;
            state.error = None;
            state.not_found = false;
        }
        self.subscribers.notify();

        // Both fetches must settle before any state commits.
        let candidates_query = ProductQuery::new();
        let (product_result, candidates_result) = futures::join!(
            self.api.fetch_product(id),
            self.api.fetch_products(&candidates_query),
        );

        {
            let mut state = self.lock_state();
            if token != self.fetch_seq.load(Ordering::SeqCst) {
                tracing::debug!(token, "discarding superseded detail fetch");
                return;
            }

            match (product_result, candidates_result) {
                (Ok(Some(product)), Ok(candidates)) => {
                    state.related = related_items(&product, &candidates);
                    state.product = Some(product);
                }
                (Ok(None), Ok(_)) => {
                    state.product = None;
                    state.related.clear();
                    state.not_found = true;
                }
                (product_result, candidates_result) => {
                    if let Err(err) = &product_result {
                        tracing::debug!(error = %err, "product fetch failed");
                    }
                    if let Err(err) = &candidates_result {
                        tracing::debug!(error = %err, "related-candidates fetch failed");
                    }
                    state.error = Some(DETAIL_ERROR_MESSAGE.to_string());
                }
            }
            state.is_loading = false;
        }
        self.subscribers.notify();
    }

    /// Reset product, related items, and error. Called when leaving the
    /// detail view.
    pub fn clear(&self) {
        *self.lock_state() = DetailState::default();
        self.subscribers.notify();
    }

    /// The loaded product, if any.
    pub fn product(&self) -> Option<Product> {
        self.lock_state().product.clone()
    }

    /// Related items for the loaded product.
    pub fn related(&self) -> Vec<RelatedProduct> {
        self.lock_state().related.clone()
    }

    /// Whether the detail lookup is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    /// The last lookup failure, if any.
    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// The single branch the detail view should render.
    pub fn view_state(&self) -> DetailViewState {
        let state = self.lock_state();
        if state.is_loading {
            DetailViewState::Loading
        } else if let Some(message) = &state.error {
            DetailViewState::Error(message.clone())
        } else if state.not_found {
            DetailViewState::NotFound
        } else if let Some(product) = &state.product {
            DetailViewState::Ready {
                product: product.clone(),
                related: state.related.clone(),
            }
        } else {
            DetailViewState::Idle
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalogApi;
    use shopfront_catalog::Category;

    fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price: 5.0 * id as f64,
            description: String::new(),
            category: Category::new(1, category),
            images: Vec::new(),
        }
    }

    fn api_with_catalog() -> Arc<FakeCatalogApi> {
        // Ten products, four of which (incl. 42) share a category.
        let mut products: Vec<Product> = (1..=6).map(|id| product(id, "Hats")).collect();
        products.push(product(42, "Shoes"));
        products.push(product(50, "Shoes"));
        products.push(product(51, "Shoes"));
        products.push(product(52, "Shoes"));
        Arc::new(FakeCatalogApi::new().with_products(products))
    }

    #[tokio::test]
    async fn test_related_items_exclude_self_capped_at_three() {
        let store = ProductStore::new(api_with_catalog());

        store.load_detail(Some(42)).await;

        let related = store.related();
        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|item| item.id != 42));
        assert_eq!(store.product().map(|p| p.id), Some(42));
    }

    #[tokio::test]
    async fn test_absent_identifier_is_noop() {
        let api = api_with_catalog();
        let store = ProductStore::new(api.clone());

        store.load_detail(None).await;

        assert_eq!(api.product_calls(), 0);
        assert_eq!(api.product_list_calls(), 0);
        assert_eq!(store.view_state(), DetailViewState::Idle);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found_not_error() {
        let store = ProductStore::new(api_with_catalog());

        store.load_detail(Some(999)).await;

        assert_eq!(store.view_state(), DetailViewState::NotFound);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_either_failure_surfaces_generic_error() {
        let api = api_with_catalog();
        let store = ProductStore::new(api.clone());
        api.fail_products(true);

        store.load_detail(Some(42)).await;

        assert_eq!(store.error().as_deref(), Some(DETAIL_ERROR_MESSAGE));

        // Retry with the same identifier recovers.
        api.fail_products(false);
        store.load_detail(Some(42)).await;
        assert!(store.error().is_none());
        assert_eq!(store.product().map(|p| p.id), Some(42));
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let store = ProductStore::new(api_with_catalog());
        store.load_detail(Some(42)).await;

        store.clear();

        assert!(store.product().is_none());
        assert!(store.related().is_empty());
        assert_eq!(store.view_state(), DetailViewState::Idle);
    }
}
