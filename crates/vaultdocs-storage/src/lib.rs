//! # vaultdocs-storage
//!
//! Storage provider implementations for VaultDocs (local filesystem and
//! in-memory) plus the [`StagingArea`] used to hold upload bytes until the
//! owning record is committed.

pub mod manager;
pub mod providers;
pub mod staging;

pub use manager::StorageManager;
pub use staging::{StagedFile, StagingArea};
