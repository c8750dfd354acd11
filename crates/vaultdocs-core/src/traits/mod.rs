//! Core traits defined in `vaultdocs-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
