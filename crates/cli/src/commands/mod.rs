//! CLI command implementations.

pub mod products;
pub mod session;

use shopwindow_catalog::auth::{FileFlagStore, SessionGate};
use shopwindow_catalog::mirror::JsonFileStore;
use shopwindow_catalog::remote::HttpProductSource;
use shopwindow_catalog::{CatalogClient, CatalogConfig, CatalogError, ConfigError, StorageError};
use thiserror::Error;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog operation failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// The session flag could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// A catalog command was issued without an open session.
    #[error("not logged in; run `sw-cli login` first")]
    NotLoggedIn,

    /// The gate rejected the submitted credentials.
    #[error("invalid credentials")]
    LoginRejected,
}

/// Everything a command needs: the catalog client and the session gate.
pub struct Context {
    pub client: CatalogClient<JsonFileStore, HttpProductSource>,
    pub gate: SessionGate<FileFlagStore>,
}

impl Context {
    /// Build the context from environment configuration.
    pub fn from_env() -> Result<Self, CliError> {
        let config = CatalogConfig::from_env()?;

        let client = CatalogClient::new(
            JsonFileStore::new(config.mirror_path()),
            HttpProductSource::new(&config),
            config.exchange_rate,
        );
        let gate = SessionGate::new(
            FileFlagStore::new(config.session_path()),
            config.username.clone(),
            config.password.clone(),
        );

        Ok(Self { client, gate })
    }

    /// Fail unless a session is open.
    pub async fn require_session(&self) -> Result<(), CliError> {
        if self.gate.is_logged_in().await {
            Ok(())
        } else {
            Err(CliError::NotLoggedIn)
        }
    }
}
