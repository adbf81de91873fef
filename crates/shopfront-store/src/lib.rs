//! State containers and URL synchronization for the storefront views.
//!
//! This crate provides:
//! - `CatalogStore` - the product-list container: query state machine,
//!   fetch orchestration with sequence tokens, derived pagination
//! - `ProductStore` - the detail container: fan-out/fan-in product and
//!   related-items lookup
//! - `url` - bidirectional mapping between query state and the address-bar
//!   query string, behind the `UrlSource` seam
//! - `Subscribers` - the explicit subscribe/notify interface both stores
//!   expose
//!
//! Both stores are constructed once at application start, shared by `Arc`,
//! and live for the whole session.

pub mod catalog_store;
pub mod product_store;
pub mod subscribe;
pub mod testing;
pub mod url;

pub use catalog_store::{CatalogStore, ListViewState};
pub use product_store::{DetailViewState, ProductStore, DETAIL_ERROR_MESSAGE};
pub use subscribe::{Subscribers, SubscriptionId};
pub use url::{MemoryUrlSource, UrlQuery, UrlSource, UrlUpdate};
