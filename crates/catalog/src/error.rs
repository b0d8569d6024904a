//! Catalog error taxonomy.
//!
//! Failures split into two propagation classes:
//!
//! - **Swallowed**: storage-layer problems degrade gracefully. An unreadable
//!   mirror blob is treated as a cache miss (the remote fetch is the recovery
//!   path), and a failed mirror write is logged while the in-memory result is
//!   still returned. Neither reaches the caller as an error on the read path.
//! - **Surfaced**: fetch failures, missing products, and mutations attempted
//!   without a populated mirror are always returned as typed errors - never
//!   panics, never silently dropped.

use shopwindow_core::ProductId;
use thiserror::Error;

/// Errors returned by [`CatalogClient`](crate::CatalogClient) operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The remote product API could not be reached or returned a failure.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The product exists neither in the mirror nor at the remote source.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A mutation was attempted before the mirror was populated.
    #[error("no cached product data; fetch the collection first")]
    NoCache,

    /// The local mirror store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the remote fetch gateway.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote source answered with a non-success status.
    #[error("unexpected status {0} from product API")]
    Status(u16),

    /// The remote source has no record for the requested identifier.
    #[error("resource not found at remote source")]
    NotFound,

    /// The configured base URL cannot carry path segments.
    #[error("invalid product API base URL")]
    BaseUrl,
}

/// Errors from the local mirror store.
///
/// Write failures (quota, permissions) are reported but non-fatal: callers
/// proceed with the in-memory result even when persistence failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(7));
        assert_eq!(err.to_string(), "product 7 not found");

        let err = CatalogError::NoCache;
        assert_eq!(
            err.to_string(),
            "no cached product data; fetch the collection first"
        );
    }

    #[test]
    fn test_fetch_error_status_display() {
        let err = FetchError::Status(503);
        assert_eq!(err.to_string(), "unexpected status 503 from product API");
    }
}
