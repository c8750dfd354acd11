//! Document lookup, filtering, and review status updates.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use vaultdocs_core::config::ReviewConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_database::repositories::DocumentRepository;
use vaultdocs_entity::document::{DocumentFilter, DocumentRecord, DocumentStatus, DocumentType};

/// Raw list criteria as received from a client. Blank values are ignored.
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    /// Document type tag.
    pub doc_type: Option<String>,
    /// Review status.
    pub status: Option<String>,
    /// Submission day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Free-text submitter match.
    pub submitter: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl DocumentQuery {
    /// Parse into a typed filter.
    pub fn into_filter(self) -> AppResult<DocumentFilter> {
        let doc_type = present(&self.doc_type)
            .map(str::parse::<DocumentType>)
            .transpose()?;
        let status = present(&self.status)
            .map(str::parse::<DocumentStatus>)
            .transpose()?;
        let date = present(&self.date)
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                    AppError::validation(format!("Invalid date '{d}': expected YYYY-MM-DD"))
                })
            })
            .transpose()?;
        let submitter = present(&self.submitter).map(str::to_string);

        Ok(DocumentFilter {
            doc_type,
            status,
            date,
            submitter,
        })
    }
}

/// Lists records and applies reviewer decisions.
#[derive(Clone)]
pub struct LookupService {
    /// Record store.
    records: Arc<dyn DocumentRepository>,
    /// Review policy.
    review: ReviewConfig,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("allow_reopen", &self.review.allow_reopen)
            .finish()
    }
}

impl LookupService {
    /// Creates a new lookup service.
    pub fn new(records: Arc<dyn DocumentRepository>, review: ReviewConfig) -> Self {
        Self { records, review }
    }

    /// List records matching `filter`, newest first.
    pub async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<DocumentRecord>> {
        self.records.list(filter).await
    }

    /// Parse raw criteria and list matching records.
    pub async fn search(&self, query: DocumentQuery) -> AppResult<Vec<DocumentRecord>> {
        let filter = query.into_filter()?;
        self.list(&filter).await
    }

    /// Fetch one record.
    pub async fn get(&self, id: DocumentId) -> AppResult<DocumentRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Set a record's review status from its wire name.
    pub async fn update_status(&self, id: DocumentId, status: &str) -> AppResult<DocumentRecord> {
        let status: DocumentStatus = status
            .parse()
            .map_err(|_| AppError::validation("Invalid status value"))?;
        self.set_status(id, status).await
    }

    /// Set a record's review status.
    ///
    /// Re-applying the current status returns the record unchanged. With
    /// reopening disabled, a decided record cannot change status.
    pub async fn set_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> AppResult<DocumentRecord> {
        let current = self.get(id).await?;
        if current.status == status {
            return Ok(current);
        }
        if !current
            .status
            .can_transition_to(status, self.review.allow_reopen)
        {
            return Err(AppError::conflict(format!(
                "Document is already {}; reopening reviewed documents is disabled",
                current.status
            )));
        }

        let updated = self
            .records
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        info!(
            document_id = %id,
            from = %current.status,
            to = %updated.status,
            "Document status updated"
        );
        Ok(updated)
    }
}
