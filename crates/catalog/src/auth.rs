//! Single-user session gate.
//!
//! The gate is a convenience lock for a single-profile viewer, not a
//! security mechanism: credentials are compared against configured literals
//! and the session is a boolean flag. The flag lives in its own storage
//! slot with a lifecycle independent of the product mirror - logging out
//! never touches mirrored products, and clearing the mirror never logs the
//! user out.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::StorageError;

/// Persistence for the boolean session flag.
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Returns the stored flag; absent or unreadable means `false`.
    async fn load(&self) -> bool;

    /// Persist the flag.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be written.
    async fn save(&self, value: bool) -> Result<(), StorageError>;

    /// Remove the flag; the next `load` returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying removal fails.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Flag store backed by a small file ("true" / "false").
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    /// Create a store persisting to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FlagStore for FileFlagStore {
    async fn load(&self) -> bool {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents.trim() == "true",
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read session flag");
                false
            }
        }
    }

    async fn save(&self, value: bool) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, if value { "true" } else { "false" }).await?;
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

/// In-memory flag store for tests.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    value: AtomicBool,
}

impl MemoryFlagStore {
    /// Create a store with the flag unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn load(&self) -> bool {
        self.value.load(Ordering::SeqCst)
    }

    async fn save(&self, value: bool) -> Result<(), StorageError> {
        self.value.store(value, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.value.store(false, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// SessionGate
// =============================================================================

/// Login gate comparing submitted credentials against configured literals.
pub struct SessionGate<F> {
    flag: F,
    username: String,
    password: SecretString,
}

impl<F: FlagStore> SessionGate<F> {
    /// Create a gate over `flag` with the expected credentials.
    pub fn new(flag: F, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            flag,
            username: username.into(),
            password,
        }
    }

    /// Attempt a login. Returns `Ok(true)` and persists the session flag on
    /// a credential match; `Ok(false)` otherwise, leaving the flag untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, StorageError> {
        if username != self.username || password != self.password.expose_secret() {
            debug!("login rejected");
            return Ok(false);
        }
        self.flag.save(true).await?;
        debug!("session opened");
        Ok(true)
    }

    /// End the session and remove the flag from storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be removed.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.flag.clear().await?;
        debug!("session closed");
        Ok(())
    }

    /// Whether a session is currently open.
    pub async fn is_logged_in(&self) -> bool {
        self.flag.load().await
    }
}
