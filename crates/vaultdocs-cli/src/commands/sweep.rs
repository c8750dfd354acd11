//! Remove staged uploads that were never committed.

use clap::Args;
use chrono::Duration;

use vaultdocs_core::config::AppConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_storage::StorageManager;

use crate::output;

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Only remove staged files older than this many minutes
    #[arg(long, default_value_t = 60)]
    pub min_age_minutes: i64,
}

/// Execute the sweep command
pub async fn execute(args: &SweepArgs, config: &AppConfig) -> Result<(), AppError> {
    if args.min_age_minutes < 0 {
        return Err(AppError::validation("--min-age-minutes must not be negative"));
    }

    let manager = StorageManager::new(&config.storage).await?;
    let removed = manager
        .staging()
        .sweep(Duration::minutes(args.min_age_minutes))
        .await?;

    output::print_success(&format!(
        "Removed {removed} staged upload(s) from '{}'",
        manager.staging().prefix()
    ));
    Ok(())
}
