//! In-memory document repository for development and tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_entity::document::{
    DocumentFiles, DocumentFilter, DocumentRecord, DocumentStatus, sort_newest_first,
};

use super::DocumentRepository;

/// Repository keeping records in a concurrent map. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentRepository {
    records: Arc<DashMap<DocumentId, DocumentRecord>>,
}

impl MemoryDocumentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create(&self, record: &DocumentRecord) -> AppResult<DocumentRecord> {
        match self.records.entry(record.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Document {} already exists",
                record.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                debug!(document_id = %record.id, "Stored document record in memory");
                Ok(record.clone())
            }
        }
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<DocumentRecord>> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<DocumentRecord>> {
        let mut matching: Vec<DocumentRecord> = self
            .records
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut matching);
        Ok(matching)
    }

    async fn set_files(
        &self,
        id: DocumentId,
        files: &DocumentFiles,
    ) -> AppResult<Option<DocumentRecord>> {
        Ok(self.records.get_mut(&id).map(|mut entry| {
            entry.files = files.clone();
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> AppResult<Option<DocumentRecord>> {
        Ok(self.records.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        Ok(self.records.remove(&id).is_some())
    }
}
