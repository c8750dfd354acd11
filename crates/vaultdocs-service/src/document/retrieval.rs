//! Document retrieval: resolves a record's file reference to a byte stream.

use std::sync::Arc;

use tracing::{debug, warn};

use vaultdocs_core::error::{AppError, ErrorKind};
use vaultdocs_core::result::AppResult;
use vaultdocs_core::traits::storage::{ByteStream, StorageProvider};
use vaultdocs_core::types::DocumentId;
use vaultdocs_database::repositories::DocumentRepository;
use vaultdocs_entity::document::DocumentType;

const NOT_IN_RECORDS: &str = "File not found in document records";
const NOT_ON_SERVER: &str = "File not found on server";

/// An open download.
pub struct DownloadResult {
    /// Stored filename, for `Content-Disposition`.
    pub file_name: String,
    /// Content length in bytes.
    pub size_bytes: u64,
    /// MIME type for `Content-Type`.
    pub content_type: &'static str,
    /// File content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Streams stored files back to clients.
#[derive(Clone)]
pub struct RetrievalService {
    /// Record store.
    records: Arc<dyn DocumentRepository>,
    /// Storage provider holding committed files.
    storage: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for RetrievalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalService").finish()
    }
}

impl RetrievalService {
    /// Creates a new retrieval service.
    pub fn new(records: Arc<dyn DocumentRepository>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { records, storage }
    }

    /// Open `file` listed under `doc_type` on record `id`.
    ///
    /// The reference must be listed on the record before storage is touched.
    pub async fn open(
        &self,
        id: DocumentId,
        doc_type: &str,
        file: &str,
    ) -> AppResult<DownloadResult> {
        let doc_type = doc_type.trim();
        let file = file.trim();
        if doc_type.is_empty() || file.is_empty() {
            return Err(AppError::validation(
                "Both 'type' and 'file' query parameters are required",
            ));
        }

        let record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        let listed = doc_type
            .parse::<DocumentType>()
            .is_ok_and(|t| record.contains_file(t, file));
        if !listed {
            debug!(document_id = %id, doc_type, file, "Download of unlisted file refused");
            return Err(AppError::not_found(NOT_IN_RECORDS));
        }

        let meta = self
            .storage
            .metadata(file)
            .await
            .map_err(|e| missing_on_server(id, file, e))?;
        let stream = self
            .storage
            .read(file)
            .await
            .map_err(|e| missing_on_server(id, file, e))?;

        Ok(DownloadResult {
            file_name: file.to_string(),
            size_bytes: meta.size_bytes,
            content_type: "application/pdf",
            stream,
        })
    }
}

fn missing_on_server(id: DocumentId, file: &str, e: AppError) -> AppError {
    if e.is(ErrorKind::NotFound) {
        warn!(document_id = %id, file, "Listed file is missing from storage");
        AppError::not_found(NOT_ON_SERVER)
    } else {
        e
    }
}
