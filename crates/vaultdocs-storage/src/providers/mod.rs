//! Storage provider implementations.

pub mod local;
pub mod memory;

pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;

use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;

/// Normalize a storage key, refusing anything that could escape the root.
///
/// Keys are `/`-separated relative paths; empty segments and `.` are
/// dropped. Absolute paths, `..`, and backslashes are rejected.
pub(crate) fn normalize_key(key: &str) -> AppResult<String> {
    if key.starts_with('/') || key.contains('\\') || key.contains('\0') {
        return Err(AppError::validation(format!("Invalid storage key: '{key}'")));
    }
    let mut segments = Vec::new();
    for segment in key.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(AppError::validation(format!("Invalid storage key: '{key}'"))),
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}
