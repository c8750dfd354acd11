//! Shared fixtures for service tests.

use std::sync::Arc;

use bytes::Bytes;

use vaultdocs_core::config::IntakeConfig;
use vaultdocs_database::repositories::{DocumentRepository, MemoryDocumentRepository};
use vaultdocs_storage::StorageManager;
use vaultdocs_storage::providers::MemoryStorageProvider;

use super::intake::{IntakeRequest, IntakeService, UploadedFile};

pub(crate) const PDF_BYTES: &[u8] = b"%PDF-1.4\n%test\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

pub(crate) struct Fixture {
    pub records: Arc<MemoryDocumentRepository>,
    pub storage: Arc<MemoryStorageProvider>,
    pub manager: StorageManager,
}

impl Fixture {
    pub fn new() -> Self {
        let records = Arc::new(MemoryDocumentRepository::new());
        let storage = Arc::new(MemoryStorageProvider::new());
        let manager = StorageManager::from_provider(storage.clone(), "staging");
        Self {
            records,
            storage,
            manager,
        }
    }

    pub fn repo(&self) -> Arc<dyn DocumentRepository> {
        self.records.clone()
    }

    pub fn intake(&self, config: IntakeConfig) -> IntakeService {
        IntakeService::new(self.repo(), self.manager.clone(), config).unwrap()
    }
}

pub(crate) fn pdf(file_name: &str) -> UploadedFile {
    UploadedFile {
        file_name: file_name.to_string(),
        content_type: Some("application/pdf".to_string()),
        data: Bytes::from_static(PDF_BYTES),
    }
}

pub(crate) fn request(files: Vec<UploadedFile>, doc_types: &[&str]) -> IntakeRequest {
    IntakeRequest {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        files,
        doc_types: doc_types.iter().map(|s| s.to_string()).collect(),
        document_id: None,
    }
}
