//! Upload staging area.
//!
//! Upload bytes are written under the staging prefix first and only moved
//! to their final key once the owning record has been persisted. Anything
//! left behind by a crash is removed by [`StagingArea::sweep`].

use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use vaultdocs_core::result::AppResult;
use vaultdocs_core::traits::storage::StorageProvider;

/// File extension of staged objects.
const STAGED_SUFFIX: &str = ".part";

/// A file written to the staging area but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Storage key of the staged bytes.
    pub key: String,
    /// Number of bytes staged.
    pub size_bytes: u64,
}

/// Staging prefix on top of a storage provider.
#[derive(Debug, Clone)]
pub struct StagingArea {
    provider: Arc<dyn StorageProvider>,
    prefix: String,
}

impl StagingArea {
    /// Create a staging area under `prefix` on `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_matches('/').to_string();
        Self { provider, prefix }
    }

    /// The staging prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Write `data` to a fresh staging key.
    pub async fn stage(&self, data: Bytes) -> AppResult<StagedFile> {
        let key = format!("{}/{}{STAGED_SUFFIX}", self.prefix, Uuid::new_v4());
        let size_bytes = data.len() as u64;
        self.provider.write(&key, data).await?;
        debug!(key = %key, size_bytes, "Staged upload");
        Ok(StagedFile { key, size_bytes })
    }

    /// Move a staged file to its final key, replacing any existing object.
    pub async fn promote(&self, staged: &StagedFile, final_key: &str) -> AppResult<()> {
        self.provider.rename(&staged.key, final_key).await
    }

    /// Delete staged files. Failures are logged, never returned.
    pub async fn discard(&self, staged: &[StagedFile]) {
        for file in staged {
            if let Err(e) = self.provider.delete(&file.key).await {
                warn!(key = %file.key, error = %e, "Failed to discard staged upload");
            }
        }
    }

    /// Remove staged files last modified at least `min_age` ago.
    ///
    /// Returns the number of files removed.
    pub async fn sweep(&self, min_age: Duration) -> AppResult<usize> {
        let cutoff = Utc::now() - min_age;
        let entries = self.provider.list(&self.prefix).await?;

        let mut removed = 0;
        for entry in entries {
            if entry.is_directory || !entry.path.ends_with(STAGED_SUFFIX) {
                continue;
            }
            if entry.last_modified.is_some_and(|t| t > cutoff) {
                continue;
            }
            self.provider.delete(&entry.path).await?;
            removed += 1;
        }

        if removed > 0 {
            info!(removed, prefix = %self.prefix, "Swept orphaned staged uploads");
        }
        Ok(removed)
    }
}
