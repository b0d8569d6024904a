//! Local mirror store: wholesale persistence of the product collection.
//!
//! The mirror holds the entire collection as a single serialized blob. A
//! `save` replaces the blob atomically from the caller's perspective; there
//! are no merge semantics and no partial writes. Once populated, the mirror
//! is treated as the sole source of truth until explicitly cleared.
//!
//! Decode failures on `load` are deliberately soft: an unreadable blob is
//! reported as absence, because every caller's fallback (a fresh remote
//! fetch) is also the recovery path for corruption.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use shopwindow_core::Product;
use tracing::warn;

use crate::error::StorageError;

/// Persistence for the mirrored product collection.
///
/// Implementations must replace the stored collection wholesale on `save`;
/// readers of `load` must never observe a partially written blob.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Returns the stored collection, or `None` if absent or unreadable.
    async fn load(&self) -> Option<Vec<Product>>;

    /// Overwrites the stored collection wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the blob cannot be serialized or written.
    /// Callers may treat this as non-fatal and proceed with the in-memory
    /// collection.
    async fn save(&self, products: &[Product]) -> Result<(), StorageError>;

    /// Removes the stored collection; the next `load` returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying removal fails.
    async fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// Mirror store backed by a single JSON file.
///
/// Writes go to a sibling temp file followed by a rename, so a crash mid-save
/// leaves either the old blob or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store persisting to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl MirrorStore for JsonFileStore {
    async fn load(&self) -> Option<Vec<Product>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read mirror file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(products) => Some(products),
            Err(err) => {
                // Treated as absence: the caller falls back to a remote fetch
                warn!(path = %self.path.display(), error = %err, "mirror blob undecodable");
                None
            }
        }
    }

    async fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(products)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory mirror store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Option<Vec<Product>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(Some(products)),
        }
    }
}

#[async_trait]
impl MirrorStore for MemoryStore {
    async fn load(&self) -> Option<Vec<Product>> {
        self.products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    async fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        *self
            .products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(products.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self
            .products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}
