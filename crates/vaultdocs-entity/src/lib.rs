//! # vaultdocs-entity
//!
//! Domain entity models for VaultDocs. Every struct in this crate is either
//! a persisted record or a domain value object. Entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`; enums persisted in PostgreSQL
//! additionally derive `sqlx::Type`.

pub mod document;

pub use document::{DocumentFiles, DocumentFilter, DocumentRecord, DocumentStatus, DocumentType};
