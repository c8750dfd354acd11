//! Upload intake and review policy configuration.

use serde::{Deserialize, Serialize};

/// Rules applied to every upload request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Maximum size of a single uploaded file in bytes (default 10 MB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Maximum number of files accepted in one request.
    #[serde(default = "default_max_files")]
    pub max_files_per_request: usize,
    /// Document types every submission must include, as wire tags
    /// (`"identity-card"`, `"tax-id"`, ...).
    #[serde(default)]
    pub required_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_files_per_request: default_max_files(),
            required_types: Vec::new(),
        }
    }
}

impl IntakeConfig {
    /// Upper bound for a whole multipart request body.
    ///
    /// Leaves 64 KiB of headroom for the text fields and part headers.
    pub fn max_request_bytes(&self) -> usize {
        let files = self
            .max_file_size_bytes
            .saturating_mul(self.max_files_per_request as u64);
        usize::try_from(files.saturating_add(64 * 1024)).unwrap_or(usize::MAX)
    }
}

/// Review workflow policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Allow moving a record out of `Verified`/`Rejected` once decided.
    #[serde(default = "default_true")]
    pub allow_reopen: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            allow_reopen: default_true(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10_485_760 // 10 MB
}

fn default_max_files() -> usize {
    10
}

fn default_true() -> bool {
    true
}
