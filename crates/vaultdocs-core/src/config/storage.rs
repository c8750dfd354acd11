//! Storage provider configuration.

use serde::{Deserialize, Serialize};

/// File storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root directory for the local provider.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Key prefix under which uncommitted uploads are staged.
    #[serde(default = "default_staging_prefix")]
    pub staging_prefix: String,
    /// Remove leftover staged uploads when the server starts.
    #[serde(default = "default_true")]
    pub sweep_on_startup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_path: default_root_path(),
            staging_prefix: default_staging_prefix(),
            sweep_on_startup: default_true(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_root_path() -> String {
    "./data/uploads".to_string()
}

fn default_staging_prefix() -> String {
    "staging".to_string()
}

fn default_true() -> bool {
    true
}
