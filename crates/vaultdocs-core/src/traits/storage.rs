//! Storage provider trait for pluggable file storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageObjectMeta {
    /// Key within the storage provider.
    pub path: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// Whether this is a directory.
    pub is_directory: bool,
}

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for file storage backends.
///
/// Keys are relative, `/`-separated paths. Implementations must refuse keys
/// that would escape their root (absolute paths, `..` segments).
/// Implemented in `vaultdocs-storage` by the local filesystem and in-memory
/// providers.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Open a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read a file into memory as a complete byte buffer.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes to a file at the given path, replacing any existing file.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file at the given path. Deleting a missing file is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Move (rename) a file, replacing the destination if it exists.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Get metadata about a file.
    async fn metadata(&self, path: &str) -> AppResult<StorageObjectMeta>;

    /// List the entries directly under a directory prefix.
    async fn list(&self, path: &str) -> AppResult<Vec<StorageObjectMeta>>;
}
