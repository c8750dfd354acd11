//! Document record entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaultdocs_core::types::DocumentId;

use super::doc_type::DocumentType;
use super::status::DocumentStatus;

/// Stored-file references keyed by document type, in upload order.
pub type DocumentFiles = BTreeMap<DocumentType, Vec<String>>;

/// One submission batch and its review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique record identifier.
    pub id: DocumentId,
    /// Submitter display name.
    pub name: String,
    /// Submitter email address (lowercase).
    pub email: String,
    /// When the record was created.
    pub submitted_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
    /// Current review status.
    pub status: DocumentStatus,
    /// Stored-file references grouped by type.
    pub files: DocumentFiles,
}

impl DocumentRecord {
    /// Create a pending record with a fresh id.
    pub fn new(name: impl Into<String>, email: impl Into<String>, files: DocumentFiles) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            name: name.into(),
            email: email.into(),
            submitted_at: now,
            updated_at: now,
            status: DocumentStatus::Pending,
            files,
        }
    }

    /// Whether at least one file is stored under `doc_type`.
    pub fn has_type(&self, doc_type: DocumentType) -> bool {
        self.files.get(&doc_type).is_some_and(|refs| !refs.is_empty())
    }

    /// Whether `file` is listed under `doc_type`.
    pub fn contains_file(&self, doc_type: DocumentType, file: &str) -> bool {
        self.files
            .get(&doc_type)
            .is_some_and(|refs| refs.iter().any(|r| r == file))
    }

    /// Append a reference under `doc_type`. A reference already listed is kept once.
    pub fn add_file(&mut self, doc_type: DocumentType, file: impl Into<String>) {
        let file = file.into();
        let refs = self.files.entry(doc_type).or_default();
        if !refs.contains(&file) {
            refs.push(file);
        }
    }

    /// Total number of stored-file references.
    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}
