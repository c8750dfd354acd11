//! Document record repositories.

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentRepository;
pub use postgres::PgDocumentRepository;

use async_trait::async_trait;

use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_entity::document::{DocumentFiles, DocumentFilter, DocumentRecord, DocumentStatus};

/// Persistence port for [`DocumentRecord`]s.
///
/// Every write is a single statement against the backing store; callers
/// that need multi-step consistency compensate explicitly.
#[async_trait]
pub trait DocumentRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "postgres", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a new record.
    async fn create(&self, record: &DocumentRecord) -> AppResult<DocumentRecord>;

    /// Find a record by id.
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<DocumentRecord>>;

    /// List records matching `filter`, newest submission first.
    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<DocumentRecord>>;

    /// Replace the file references of a record, leaving its status and
    /// submitter untouched. Returns `None` when the record does not exist.
    async fn set_files(
        &self,
        id: DocumentId,
        files: &DocumentFiles,
    ) -> AppResult<Option<DocumentRecord>>;

    /// Set the review status. Returns `None` when the record does not exist.
    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> AppResult<Option<DocumentRecord>>;

    /// Delete a record. Returns `true` if a record was removed.
    async fn delete(&self, id: DocumentId) -> AppResult<bool>;
}
