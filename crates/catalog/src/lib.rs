//! Shopwindow Catalog - local-mirror product catalog engine.
//!
//! # Architecture
//!
//! The catalog is a read-through cache over a public product API. The full
//! collection is fetched from the remote source at most once, converted to
//! the display currency, and mirrored wholesale into a local store. From
//! then on the mirror is the sole source of truth: reads serve from it, and
//! edits and deletes are applied against it directly - nothing is ever
//! written back to the remote API.
//!
//! Mutations are optimistic: any in-memory query result that depends on the
//! target product is patched speculatively before the mirror write, and
//! restored to its exact prior contents if the write cannot proceed.
//!
//! # Layers
//!
//! - [`remote`] - HTTP gateway to the product API (`reqwest`)
//! - [`currency`] - source-to-display currency conversion
//! - [`mirror`] - wholesale persistence of the product collection
//! - [`cache`] - tagged in-memory query results with explicit rollback
//! - [`client`] - the [`CatalogClient`] orchestrating reads and mutations
//! - [`auth`] - single-user session flag, stored independently of the mirror
//! - [`filters`] - in-memory search and category filtering
//!
//! # Example
//!
//! ```rust,ignore
//! use shopwindow_catalog::{CatalogClient, CatalogConfig};
//! use shopwindow_catalog::mirror::JsonFileStore;
//! use shopwindow_catalog::remote::HttpProductSource;
//!
//! let config = CatalogConfig::from_env()?;
//! let client = CatalogClient::new(
//!     JsonFileStore::new(config.mirror_path()),
//!     HttpProductSource::new(&config),
//!     config.exchange_rate,
//! );
//!
//! let products = client.get_collection().await?;
//! let product = client.get_by_id(products[0].id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod filters;
pub mod mirror;
pub mod remote;

pub use client::CatalogClient;
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, FetchError, StorageError};
