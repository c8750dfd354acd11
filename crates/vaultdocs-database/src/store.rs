//! Document store that dispatches to the configured repository backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use vaultdocs_core::config::DatabaseConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_entity::document::{DocumentFiles, DocumentFilter, DocumentRecord, DocumentStatus};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{DocumentRepository, MemoryDocumentRepository, PgDocumentRepository};

/// Record store wrapping the configured [`DocumentRepository`].
///
/// The backend is selected at construction time from `database.provider`.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentRepository>,
}

impl DocumentStore {
    /// Connect to the configured backend, running migrations for PostgreSQL
    /// when `auto_migrate` is set.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn DocumentRepository> = match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL document store");
                let pool = DatabasePool::connect(config).await?;
                if config.auto_migrate {
                    run_migrations(pool.pool()).await?;
                }
                Arc::new(PgDocumentRepository::new(pool.into_pool()))
            }
            "memory" => {
                info!("Initializing in-memory document store");
                Arc::new(MemoryDocumentRepository::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown database provider: '{other}'. Supported: postgres, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store from an existing repository (for testing).
    pub fn from_repository(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { inner: repository }
    }

    /// Get a reference to the inner repository.
    pub fn repository(&self) -> &dyn DocumentRepository {
        self.inner.as_ref()
    }
}

#[async_trait]
impl DocumentRepository for DocumentStore {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn create(&self, record: &DocumentRecord) -> AppResult<DocumentRecord> {
        self.inner.create(record).await
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<DocumentRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<DocumentRecord>> {
        self.inner.list(filter).await
    }

    async fn set_files(
        &self,
        id: DocumentId,
        files: &DocumentFiles,
    ) -> AppResult<Option<DocumentRecord>> {
        self.inner.set_files(id, files).await
    }

    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> AppResult<Option<DocumentRecord>> {
        self.inner.update_status(id, status).await
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        self.inner.delete(id).await
    }
}
