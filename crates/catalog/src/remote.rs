//! Remote fetch gateway for the public product API.
//!
//! The remote source is a fixed external collaborator exposing two read
//! endpoints:
//!
//! - `GET /products` - the full collection of raw product records
//! - `GET /products/{id}` - a single raw record
//!
//! Prices on the wire are in the source currency; callers convert them via
//! [`currency::normalize`](crate::currency::normalize) before the records
//! enter the mirror or any query result. No write endpoints exist here:
//! updates and deletes are local-mirror-only and never propagate back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use shopwindow_core::ProductId;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::FetchError;

/// A product record as returned by the remote API, price in source currency.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: RawRating,
}

/// Aggregate rating as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRating {
    pub rate: Decimal,
    pub count: u32,
}

/// Read access to the remote product source.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the full product collection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure or a non-success status.
    async fn fetch_all(&self) -> Result<Vec<RawProduct>, FetchError>;

    /// Fetch a single product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] if the remote source has no record
    /// for `id`, or another [`FetchError`] on transport failure.
    async fn fetch_one(&self, id: ProductId) -> Result<RawProduct, FetchError>;
}

// =============================================================================
// HttpProductSource
// =============================================================================

/// `reqwest`-backed gateway to the product API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProductSource {
    /// Create a gateway for the API configured in `config`.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a gateway against an explicit base URL (used by tests).
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| FetchError::BaseUrl)?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<RawProduct>, FetchError> {
        let url = self.endpoint(&["products"])?;
        let products: Vec<RawProduct> = self.get(url).await?.json().await?;
        debug!(count = products.len(), "fetched full collection");
        Ok(products)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn fetch_one(&self, id: ProductId) -> Result<RawProduct, FetchError> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        let product: RawProduct = self.get(url).await?.json().await?;
        debug!("fetched single product");
        Ok(product)
    }
}
