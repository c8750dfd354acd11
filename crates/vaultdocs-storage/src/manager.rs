//! Storage manager: builds the configured provider and its staging area.

use std::sync::Arc;

use tracing::info;

use vaultdocs_core::config::StorageConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::traits::storage::StorageProvider;

use crate::providers::{LocalStorageProvider, MemoryStorageProvider};
use crate::staging::StagingArea;

/// Holds the active storage provider and the staging area on top of it.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
    staging: StagingArea,
}

impl StorageManager {
    /// Build the provider named by `storage.provider`.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.root_path, "Initializing local storage provider");
                Arc::new(LocalStorageProvider::new(&config.root_path).await?)
            }
            "memory" => {
                info!("Initializing in-memory storage provider");
                Arc::new(MemoryStorageProvider::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: local, memory"
                )));
            }
        };

        Ok(Self::from_provider(provider, &config.staging_prefix))
    }

    /// Wrap an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn StorageProvider>, staging_prefix: &str) -> Self {
        let staging = StagingArea::new(provider.clone(), staging_prefix);
        Self { provider, staging }
    }

    /// The active provider.
    pub fn provider(&self) -> Arc<dyn StorageProvider> {
        self.provider.clone()
    }

    /// The staging area.
    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }
}
