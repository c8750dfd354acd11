//! Database migration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use vaultdocs_core::config::AppConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_database::DatabasePool;
use vaultdocs_database::migration::{migration_status, run_migrations};

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
    applied: bool,
}

/// Execute migration commands
pub async fn execute(
    args: &MigrateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.provider != "postgres" {
        return Err(AppError::configuration(format!(
            "Migrations require the postgres provider (configured: '{}')",
            config.database.provider
        )));
    }
    let pool = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            let rows: Vec<MigrationRow> = migration_status(pool.pool())
                .await?
                .into_iter()
                .map(|m| MigrationRow {
                    version: m.version,
                    description: m.description,
                    applied: m.applied,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
