//! Upload intake: validate, stage, persist, promote.

use std::collections::BTreeSet;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};

use vaultdocs_core::config::IntakeConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_database::repositories::DocumentRepository;
use vaultdocs_entity::document::{DocumentFiles, DocumentRecord, DocumentType};
use vaultdocs_storage::{StagedFile, StorageManager};

use super::naming::plan_names;
use super::pdf::ensure_pdf;
use super::submitter::Submitter;

/// One file received in an upload request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-side filename.
    pub file_name: String,
    /// Declared content type.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// An upload submission.
#[derive(Debug, Clone, Default)]
pub struct IntakeRequest {
    /// Submitter display name.
    pub name: String,
    /// Submitter email.
    pub email: String,
    /// Uploaded files, in form order.
    pub files: Vec<UploadedFile>,
    /// Document-type tags aligned positionally with `files`.
    pub doc_types: Vec<String>,
    /// Existing record to append to.
    pub document_id: Option<DocumentId>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    /// The stored record.
    pub document: DocumentRecord,
    /// `true` when a new record was created, `false` for an append.
    pub created: bool,
}

/// A validated file ready to be staged.
struct PlannedFile {
    doc_type: DocumentType,
    stored_name: String,
    data: Bytes,
}

/// Accepts document uploads and commits them to storage and the record store.
#[derive(Clone)]
pub struct IntakeService {
    /// Record store.
    records: Arc<dyn DocumentRepository>,
    /// Storage provider and staging area.
    storage: StorageManager,
    /// Intake limits.
    config: IntakeConfig,
    /// Types every record must contain.
    required_types: BTreeSet<DocumentType>,
}

impl std::fmt::Debug for IntakeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeService")
            .field("required_types", &self.required_types)
            .finish()
    }
}

impl IntakeService {
    /// Creates a new intake service. Fails if a configured required type is unknown.
    pub fn new(
        records: Arc<dyn DocumentRepository>,
        storage: StorageManager,
        config: IntakeConfig,
    ) -> AppResult<Self> {
        let required_types = config
            .required_types
            .iter()
            .map(|t| {
                t.parse::<DocumentType>().map_err(|e| {
                    AppError::configuration(format!("intake.required_types: {}", e.message))
                })
            })
            .collect::<AppResult<BTreeSet<_>>>()?;

        Ok(Self {
            records,
            storage,
            config,
            required_types,
        })
    }

    /// Validate and commit a submission.
    ///
    /// Files are staged first, the record is written second, and staged files
    /// are moved to their final names last. A failure at any step leaves no
    /// new record and no staged bytes behind.
    pub async fn submit(&self, request: IntakeRequest) -> AppResult<IntakeOutcome> {
        if request.files.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }
        if request.files.len() > self.config.max_files_per_request {
            return Err(AppError::validation(format!(
                "Too many files: at most {} files may be uploaded at once",
                self.config.max_files_per_request
            )));
        }

        let submitter = Submitter::parse(&request.name, &request.email)?;
        let doc_types = self.resolve_types(&request)?;

        for file in &request.files {
            self.check_file(file)?;
        }

        let existing = match request.document_id {
            Some(id) => {
                let record = self
                    .records
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Document not found"))?;
                if !submitter.owns(&record.name, &record.email) {
                    return Err(AppError::validation(
                        "Name and email must match the existing document",
                    ));
                }
                Some(record)
            }
            None => None,
        };

        self.check_required_types(&doc_types, existing.as_ref())?;

        let names = plan_names(&doc_types, &submitter.name);
        let planned: Vec<PlannedFile> = doc_types
            .into_iter()
            .zip(names)
            .zip(request.files)
            .map(|((doc_type, stored_name), file)| PlannedFile {
                doc_type,
                stored_name,
                data: file.data,
            })
            .collect();

        let staged = self.stage_all(&planned).await?;

        let (document, previous) = match existing {
            Some(record) => {
                let mut merged = record.clone();
                for file in &planned {
                    merged.add_file(file.doc_type, file.stored_name.clone());
                }
                let written = self
                    .records
                    .set_files(record.id, &merged.files)
                    .await
                    .and_then(|stored| {
                        stored.ok_or_else(|| AppError::not_found("Document not found"))
                    });
                match written {
                    Ok(stored) => (stored, Some(record.files)),
                    Err(e) => {
                        self.storage.staging().discard(&staged).await;
                        return Err(e);
                    }
                }
            }
            None => {
                let mut files = DocumentFiles::new();
                for file in &planned {
                    files
                        .entry(file.doc_type)
                        .or_default()
                        .push(file.stored_name.clone());
                }
                let record = DocumentRecord::new(submitter.name, submitter.email, files);
                match self.records.create(&record).await {
                    Ok(stored) => (stored, None),
                    Err(e) => {
                        self.storage.staging().discard(&staged).await;
                        return Err(e);
                    }
                }
            }
        };

        if let Err(e) = self.promote_all(&planned, &staged).await {
            self.compensate(&document, previous.as_ref()).await;
            self.storage.staging().discard(&staged).await;
            return Err(e);
        }

        let created = previous.is_none();
        info!(
            document_id = %document.id,
            files = planned.len(),
            created,
            "Document upload committed"
        );

        Ok(IntakeOutcome { document, created })
    }

    /// Parse tags and align them with files. A lone untagged file is `other`.
    fn resolve_types(&self, request: &IntakeRequest) -> AppResult<Vec<DocumentType>> {
        if request.doc_types.is_empty() && request.files.len() == 1 {
            return Ok(vec![DocumentType::Other]);
        }
        if request.doc_types.len() != request.files.len() {
            return Err(AppError::validation(format!(
                "Number of files ({}) does not match number of document types ({})",
                request.files.len(),
                request.doc_types.len()
            )));
        }
        request
            .doc_types
            .iter()
            .map(|t| t.parse::<DocumentType>())
            .collect()
    }

    fn check_file(&self, file: &UploadedFile) -> AppResult<()> {
        if file.data.is_empty() {
            return Err(AppError::validation(format!(
                "File '{}' is empty",
                file.file_name
            )));
        }
        if file.data.len() as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File '{}' exceeds the maximum size of {} bytes",
                file.file_name, self.config.max_file_size_bytes
            )));
        }
        ensure_pdf(&file.file_name, file.content_type.as_deref(), &file.data)
    }

    fn check_required_types(
        &self,
        submitted: &[DocumentType],
        existing: Option<&DocumentRecord>,
    ) -> AppResult<()> {
        let missing: Vec<&str> = self
            .required_types
            .iter()
            .filter(|t| !submitted.contains(*t) && !existing.is_some_and(|r| r.has_type(**t)))
            .map(|t| t.as_str())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Missing required document types: {}",
                missing.join(", ")
            )))
        }
    }

    async fn stage_all(&self, planned: &[PlannedFile]) -> AppResult<Vec<StagedFile>> {
        let staging = self.storage.staging();
        let mut staged = Vec::with_capacity(planned.len());
        for file in planned {
            match staging.stage(file.data.clone()).await {
                Ok(s) => staged.push(s),
                Err(e) => {
                    staging.discard(&staged).await;
                    return Err(e);
                }
            }
        }
        Ok(staged)
    }

    async fn promote_all(&self, planned: &[PlannedFile], staged: &[StagedFile]) -> AppResult<()> {
        let staging = self.storage.staging();
        for (file, staged_file) in planned.iter().zip(staged) {
            staging.promote(staged_file, &file.stored_name).await?;
        }
        Ok(())
    }

    /// Undo the record write after a failed promotion. Only the file
    /// references are restored, so a concurrent review decision survives.
    async fn compensate(&self, document: &DocumentRecord, previous: Option<&DocumentFiles>) {
        let result = match previous {
            Some(files) => self.records.set_files(document.id, files).await.map(|_| ()),
            None => self.records.delete(document.id).await.map(|_| ()),
        };
        match result {
            Ok(()) => warn!(document_id = %document.id, "Rolled back document record after storage failure"),
            Err(e) => error!(
                document_id = %document.id,
                error = %e,
                "Failed to roll back document record after storage failure"
            ),
        }
    }
}
