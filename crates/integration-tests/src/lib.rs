//! Integration tests for Shopwindow.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopwindow-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_reads` - read-through caching against a scripted source
//! - `catalog_mutations` - optimistic update/delete with rollback
//! - `http_gateway` - full stack over wiremock and a temp-file mirror
//!
//! The helpers here script the remote source and count its invocations, so
//! the fetch-at-most-once lifecycle is directly observable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use shopwindow_catalog::mirror::MirrorStore;
use shopwindow_catalog::remote::{ProductSource, RawProduct, RawRating};
use shopwindow_catalog::{FetchError, StorageError};
use shopwindow_core::{Product, ProductId};

/// Scripted in-process product source.
///
/// Serves a fixed set of raw records and counts every invocation; set
/// `failing` to make every call return a transport-style error.
#[derive(Clone)]
pub struct ScriptedSource {
    products: Vec<RawProduct>,
    calls: Arc<AtomicUsize>,
    failing: bool,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(products: Vec<RawProduct>) -> Self {
        Self {
            products,
            calls: Arc::new(AtomicUsize::new(0)),
            failing: false,
        }
    }

    /// A source whose every call fails with a 503.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            products: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            failing: true,
        }
    }

    /// Number of remote calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for ScriptedSource {
    async fn fetch_all(&self) -> Result<Vec<RawProduct>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(FetchError::Status(503));
        }
        Ok(self.products.clone())
    }

    async fn fetch_one(&self, id: ProductId) -> Result<RawProduct, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(FetchError::Status(503));
        }
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}

/// Mirror store whose every `save` fails, as if the backing slot were full
/// or read-only. Loads and clears behave normally.
#[derive(Default)]
pub struct UnwritableStore {
    products: Mutex<Option<Vec<Product>>>,
}

impl UnwritableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with already-converted `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(Some(products)),
        }
    }
}

#[async_trait]
impl MirrorStore for UnwritableStore {
    async fn load(&self) -> Option<Vec<Product>> {
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn save(&self, _products: &[Product]) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "store is read-only",
        )))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self
            .products
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// A raw (source-currency) product record for test fixtures.
#[must_use]
pub fn raw_product(id: u64, title: &str, price: Decimal, category: &str) -> RawProduct {
    RawProduct {
        id: ProductId::new(id),
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://example.com/{id}.jpg"),
        rating: RawRating {
            rate: Decimal::new(41, 1),
            count: 25,
        },
    }
}

/// The standard three-product fixture used across the test files.
#[must_use]
pub fn fixture() -> Vec<RawProduct> {
    vec![
        raw_product(1, "Fjallraven Backpack", Decimal::new(10_995, 2), "men's clothing"),
        raw_product(2, "Cotton Shirt", Decimal::new(2_230, 2), "men's clothing"),
        raw_product(3, "External Hard Drive", Decimal::new(6_400, 2), "electronics"),
    ]
}
