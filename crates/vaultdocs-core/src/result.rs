//! Convenience result type alias for VaultDocs.

use crate::error::AppError;

/// A specialized `Result` type for VaultDocs operations.
pub type AppResult<T> = Result<T, AppError>;
