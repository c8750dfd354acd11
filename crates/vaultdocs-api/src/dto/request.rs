//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use vaultdocs_service::DocumentQuery;

/// Review status update body for `PUT /api/documents/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// Target status: `Pending`, `Verified` or `Rejected`.
    #[serde(default)]
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Query string for `GET /api/documents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    /// Document type tag.
    pub doc_type: Option<String>,
    /// Review status.
    pub status: Option<String>,
    /// Submission day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Free-text submitter match.
    pub q: Option<String>,
    /// Alias of `q`.
    pub submitter: Option<String>,
}

impl From<ListDocumentsQuery> for DocumentQuery {
    fn from(query: ListDocumentsQuery) -> Self {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        let submitter = if blank(&query.q) {
            query.submitter
        } else {
            query.q
        };

        DocumentQuery {
            doc_type: query.doc_type,
            status: query.status,
            date: query.date,
            submitter,
        }
    }
}

/// Query string for `GET /api/documents/{id}/download`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// Document type tag the file is listed under.
    #[serde(rename = "type", default)]
    pub doc_type: String,
    /// Stored file reference.
    #[serde(default)]
    pub file: String,
}
