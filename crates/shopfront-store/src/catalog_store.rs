//! The product-list state container.
//!
//! Owns the query state machine (loading / searching / filtering flags,
//! error slot), the single-slot result cache, and the fetch orchestration
//! that keeps them in sync with the address bar. Pagination and the view
//! branch are derived on read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_catalog::{
    category_options, filters_for_ids, page_slice, Category, CategoryFilter, Pagination, Product,
    QueryState, PRODUCTS_PER_PAGE,
};
use shopfront_data::{CatalogApi, FetchError, ProductQuery};

use crate::subscribe::{Subscribers, SubscriptionId};
use crate::url::{self, UrlSource, UrlUpdate};

/// The single UI branch the rendering collaborator should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListViewState {
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed; offer a retry.
    Error(String),
    /// Empty result under active search text or filters.
    EmptyFiltered,
    /// Empty result with no criteria: the catalog itself is empty.
    EmptyCatalog,
    /// Products are available to render.
    Ready,
}

/// Which user action triggered a product fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchTrigger {
    Hydrate,
    Search,
    Filter,
    Retry,
}

#[derive(Debug, Default, Clone)]
struct CatalogState {
    products: Vec<Product>,
    categories: Vec<Category>,
    query: QueryState,
    is_loading: bool,
    is_searching: bool,
    is_filtering: bool,
    error: Option<String>,
}

/// Session-lifetime store for the product-list view.
///
/// Construct once at application start and share by `Arc`. All getters
/// recompute derived values from current state.
pub struct CatalogStore {
    api: Arc<dyn CatalogApi>,
    url: Arc<dyn UrlSource>,
    state: Mutex<CatalogState>,
    fetch_seq: AtomicU64,
    subscribers: Subscribers,
}

impl CatalogStore {
    /// Create a store over the given API and URL collaborators.
    pub fn new(api: Arc<dyn CatalogApi>, url: Arc<dyn UrlSource>) -> Self {
        Self {
            api,
            url,
            state: Mutex::new(CatalogState::default()),
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

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Hydrate query state from the address bar and fetch.
    ///
    /// The category fetch and the first product fetch run concurrently;
    /// the product fetch narrows by the raw decoded ids because filters
    /// may not resolve until the category list arrives. Display filters
    /// are re-resolved once both settle.
    pub async fn hydrate_from_url(&self) {
        let decoded = url::decode(&self.url.query_string());
        {
            let mut guard = self.lock_state();
            let state = &mut *guard;
            state.query.search_text = decoded.search.clone();
            state.query.page = decoded.page;
            state.query.filters = filters_for_ids(&state.categories, &decoded.category_ids);
        }
        self.subscribers.notify();

        futures::join!(
            self.ensure_categories(),
            self.run_fetch(
                decoded.search.clone(),
                decoded.category_ids.clone(),
                FetchTrigger::Hydrate,
            ),
        );

        {
            let mut guard = self.lock_state();
            let state = &mut *guard;
            state.query.filters = filters_for_ids(&state.categories, &decoded.category_ids);
        }
        self.subscribers.notify();
    }

    /// Load the category list once per session.
    ///
    /// A failure is logged and swallowed; the list view never errors
    /// because categories were unavailable.
    pub async fn ensure_categories(&self) {
        if !self.lock_state().categories.is_empty() {
            return;
        }

        match self.api.fetch_categories().await {
            Ok(categories) => {
                self.lock_state().categories = categories;
                self.subscribers.notify();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
            }
        }
    }

    /// Update the search input value. No fetch, no page reset.
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.lock_state().query.search_text = text.into();
        self.subscribers.notify();
    }

    /// Submit the current search text: trim, reset to page 1, push the
    /// URL, fetch with the searching flag set.
    pub async fn search(&self) {
        let (search, ids) = {
            let mut state = self.lock_state();
            let text = state.query.search_text.clone();
            state.query.apply_search(text);
            (state.query.search_text.clone(), state.query.category_ids())
        };

        self.push_url(UrlUpdate {
            search: Some(search.clone()),
            category_ids: Some(ids.clone()),
            page: Some(1),
        });
        self.run_fetch(search, ids, FetchTrigger::Search).await;
    }

    /// Replace the filter set: reset to page 1, push the URL, fetch with
    /// the filtering flag set.
    pub async fn filter_change(&self, filters: Vec<CategoryFilter>) {
        let (search, ids) = {
            let mut state = self.lock_state();
            state.query.apply_filters(filters);
            (state.query.search_text.clone(), state.query.category_ids())
        };

        self.push_url(UrlUpdate {
            search: Some(search.clone()),
            category_ids: Some(ids.clone()),
            page: Some(1),
        });
        self.run_fetch(search, ids, FetchTrigger::Filter).await;
    }

    /// Navigate to a page. Pushes a page-only URL update and notifies;
    /// pagination re-slices the cached result set, so no fetch happens.
    pub fn page_change(&self, page: u32) {
        self.lock_state().query.apply_page(page);
        self.push_url(UrlUpdate {
            page: Some(page),
            ..Default::default()
        });
        self.subscribers.notify();
    }

    /// Re-issue the product fetch with the current query state.
    pub async fn retry(&self) {
        let (search, ids) = {
            let state = self.lock_state();
            (state.query.search_text.clone(), state.query.category_ids())
        };
        self.run_fetch(search, ids, FetchTrigger::Retry).await;
    }

    // ------------------------------------------------------------------
    // Derived getters
    // ------------------------------------------------------------------

    /// Snapshot of the current query state.
    pub fn query(&self) -> QueryState {
        self.lock_state().query.clone()
    }

    /// The full filtered result set.
    pub fn products(&self) -> Vec<Product> {
        self.lock_state().products.clone()
    }

    /// Number of products in the filtered result set.
    pub fn total_products(&self) -> usize {
        self.lock_state().products.len()
    }

    /// The slice of the result set for the current page.
    pub fn paginated_products(&self) -> Vec<Product> {
        let state = self.lock_state();
        page_slice(&state.products, state.query.page, PRODUCTS_PER_PAGE).to_vec()
    }

    /// Pagination info for the current page and result set.
    pub fn pagination(&self) -> Pagination {
        let state = self.lock_state();
        Pagination::new(state.query.page, PRODUCTS_PER_PAGE, state.products.len())
    }

    /// Total page count for the current result set.
    pub fn total_pages(&self) -> u32 {
        self.pagination().total_pages
    }

    /// The loaded category list.
    pub fn categories(&self) -> Vec<Category> {
        self.lock_state().categories.clone()
    }

    /// Dropdown options projected from the loaded categories.
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        category_options(&self.lock_state().categories)
    }

    /// Whether any product fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    /// Whether the in-flight fetch came from a search submit.
    pub fn is_searching(&self) -> bool {
        self.lock_state().is_searching
    }

    /// Whether the in-flight fetch came from a filter change.
    pub fn is_filtering(&self) -> bool {
        self.lock_state().is_filtering
    }

    /// The last fetch failure, if any.
    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// The single branch the collaborator should render.
    pub fn view_state(&self) -> ListViewState {
        let state = self.lock_state();
        if state.is_loading {
            ListViewState::Loading
        } else if let Some(message) = &state.error {
            ListViewState::Error(message.clone())
        } else if state.products.is_empty() {
            if state.query.has_criteria() {
                ListViewState::EmptyFiltered
            } else {
                ListViewState::EmptyCatalog
            }
        } else {
            ListViewState::Ready
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn run_fetch(&self, search: String, category_ids: Vec<u64>, trigger: FetchTrigger) {
        // Sequence token: of overlapping fetches, only the latest-issued
        // resolution may commit.
        let token = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock_state();
            state.is_loading = true;
            state.is_searching = trigger == FetchTrigger::Search;
            state.is_filtering = trigger == FetchTrigger::Filter;
            state.error = None;
        }
        self.subscribers.notify();

        let query = ProductQuery::new()
            .with_search(search)
            .with_categories(category_ids);
        let result = self.api.fetch_products(&query).await;

        if !self.commit_fetch(token, result) {
            return;
        }
        self.subscribers.notify();
    }

    /// Commit a fetch resolution unless a newer fetch has been issued.
    /// Returns whether the resolution was applied.
    fn commit_fetch(&self, token: u64, result: Result<Vec<Product>, FetchError>) -> bool {
        let mut state = self.lock_state();
        if token != self.fetch_seq.load(Ordering::SeqCst) {
            tracing::debug!(token, "discarding superseded product fetch");
            return false;
        }

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product fetch committed");
                state.products = products;
            }
            Err(err) => {
                tracing::debug!(error = %err, "product fetch failed");
                state.error = Some(format!("Failed to load products: {err}"));
            }
        }
        state.is_loading = false;
        state.is_searching = false;
        state.is_filtering = false;
        true
    }

    fn push_url(&self, update: UrlUpdate) {
        let current = self.url.query_string();
        self.url.replace_query_string(&update.apply(&current));
    }

    fn lock_state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
