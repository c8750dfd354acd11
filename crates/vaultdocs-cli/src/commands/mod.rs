//! CLI command definitions and dispatch.

pub mod documents;
pub mod migrate;
pub mod serve;
pub mod sweep;

use clap::{Parser, Subcommand};

use vaultdocs_core::config::AppConfig;
use vaultdocs_core::error::AppError;

use crate::output::OutputFormat;

/// VaultDocs: document upload and review service
#[derive(Debug, Parser)]
#[command(name = "vaultdocs", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and `{env}.toml`
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Configuration environment
    #[arg(short, long, env = "VAULTDOCS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the VaultDocs server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect and review document records
    Documents(documents::DocumentsArgs),
    /// Remove abandoned staged uploads
    Sweep(sweep::SweepArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::Documents(args) => documents::execute(args, &config, self.format).await,
            Commands::Sweep(args) => sweep::execute(args, &config).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from_dir(&self.config, &self.env)
    }
}
