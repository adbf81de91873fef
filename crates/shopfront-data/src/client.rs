//! HTTP client for the remote catalog API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shopfront_catalog::{Category, Product, ProductImage};

use crate::error::FetchError;
use crate::query::ProductQuery;
use crate::CatalogApi;

/// Default base URL of the catalog API.
pub const DEFAULT_API_BASE: &str = "https://front-school-strapi.ktsdev.ru/api";

/// Timeout applied to product-list requests.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope used by every catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Wire shape of a relation-expanded product row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "documentId")]
    pub document_id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "productCategory")]
    pub product_category: CategoryRow,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductRow {
    /// Convert into the domain product.
    pub fn into_product(self) -> Product {
        Product {
            id: self.document_id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.product_category.into_category(),
            images: self.images,
        }
    }
}

/// Wire shape of a category row.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

impl CategoryRow {
    /// Convert into the domain category, applying the unnamed fallback.
    pub fn into_category(self) -> Category {
        Category::with_fallback_title(self.id, self.title)
    }
}

/// Reqwest-backed catalog API client.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpCatalogClient {
    /// Create a client against the default API base URL.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        url: String,
        timeout: Option<Duration>,
    ) -> Result<T, FetchError> {
        tracing::debug!(%url, "catalog request");

        let mut request = self.http.get(&url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &url, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|err| map_reqwest_error(err, &url, timeout))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/products?{}", self.base_url, query.to_query_string());
        let rows: Vec<ProductRow> = self.get_data(url, Some(LIST_TIMEOUT)).await?;
        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn fetch_product(&self, id: u64) -> Result<Option<Product>, FetchError> {
        let url = format!(
            "{}/products/{}?{}",
            self.base_url,
            id,
            ProductQuery::new().to_query_string()
        );
        match self.get_data::<ProductRow>(url, None).await {
            Ok(row) => Ok(Some(row.into_product())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = format!("{}/product-categories", self.base_url);
        let rows: Vec<CategoryRow> = self.get_data(url, None).await?;
        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}

/// Map a transport error onto the fetch error taxonomy.
fn map_reqwest_error(err: reqwest::Error, url: &str, timeout: Option<Duration>) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout.unwrap_or(LIST_TIMEOUT))
    } else if err.is_decode() {
        FetchError::Deserialization(err.to_string())
    } else if let Some(status) = err.status() {
        FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }
    } else {
        FetchError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_catalog::UNNAMED_CATEGORY;

    const PRODUCT_JSON: &str = r#"{
        "data": [
            {
                "documentId": 42,
                "title": "Canvas Sneakers",
                "price": 59.5,
                "description": "Low-top canvas sneakers",
                "productCategory": { "id": 5, "title": "Shoes" },
                "images": [
                    {
                        "url": "/sneakers.jpg",
                        "formats": { "large": { "url": "/sneakers-large.jpg" } }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_product_row_mapping() {
        let envelope: DataEnvelope<Vec<ProductRow>> =
            serde_json::from_str(PRODUCT_JSON).unwrap();
        let product = envelope.data.into_iter().next().unwrap().into_product();

        assert_eq!(product.id, 42);
        assert_eq!(product.title, "Canvas Sneakers");
        assert_eq!(product.category.id, 5);
        assert_eq!(product.category.title, "Shoes");
        assert_eq!(product.images[0].display_url(), "/sneakers-large.jpg");
    }

    #[test]
    fn test_product_row_optional_fields() {
        let json = r#"{
            "documentId": 7,
            "title": "Plain Tee",
            "price": 12.0,
            "productCategory": { "id": 2 }
        }"#;
        let row: ProductRow = serde_json::from_str(json).unwrap();
        let product = row.into_product();

        assert_eq!(product.description, "");
        assert!(product.images.is_empty());
        assert_eq!(product.category.title, UNNAMED_CATEGORY);
    }

    #[test]
    fn test_category_row_fallback_title() {
        let row: CategoryRow = serde_json::from_str(r#"{ "id": 3 }"#).unwrap();
        assert_eq!(row.into_category().title, UNNAMED_CATEGORY);

        let named: CategoryRow =
            serde_json::from_str(r#"{ "id": 3, "title": "Hats" }"#).unwrap();
        assert_eq!(named.into_category().title, "Hats");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpCatalogClient::new().with_base_url("https://example.test/api/");
        assert_eq!(client.base_url(), "https://example.test/api");
    }
}
