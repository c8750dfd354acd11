//! # vaultdocs-service
//!
//! Business logic service layer for VaultDocs. Each service orchestrates
//! the document record store and the storage provider to implement one
//! application-level use case: upload intake, lookup and review, and
//! retrieval.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod document;

pub use document::{
    DocumentQuery, DownloadResult, IntakeOutcome, IntakeRequest, IntakeService, LookupService,
    RetrievalService, UploadedFile,
};
