//! Document record CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use vaultdocs_core::config::AppConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::types::DocumentId;
use vaultdocs_database::DocumentStore;
use vaultdocs_entity::document::DocumentRecord;
use vaultdocs_service::{DocumentQuery, LookupService};

use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocumentsArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocumentsCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocumentsCommand {
    /// List records, newest first
    List {
        /// Only records holding a file of this type
        #[arg(long)]
        doc_type: Option<String>,
        /// Filter by review status
        #[arg(long)]
        status: Option<String>,
        /// Submission day (YYYY-MM-DD, UTC)
        #[arg(long)]
        date: Option<String>,
        /// Case-insensitive match on name or email
        #[arg(short, long)]
        q: Option<String>,
    },
    /// Show one record
    Show {
        /// Record id
        id: String,
    },
    /// Set a record's review status
    SetStatus {
        /// Record id
        id: String,
        /// Pending, Verified or Rejected
        status: String,
    },
}

/// Record display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    id: String,
    name: String,
    email: String,
    status: String,
    submitted_at: String,
    files: String,
}

impl From<&DocumentRecord> for DocumentRow {
    fn from(doc: &DocumentRecord) -> Self {
        let files = doc
            .files
            .iter()
            .map(|(doc_type, names)| format!("{doc_type}: {}", names.len()))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            status: doc.status.to_string(),
            submitted_at: doc.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
            files,
        }
    }
}

fn parse_id(raw: &str) -> Result<DocumentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid document id: '{raw}'")))
}

/// Execute document commands
pub async fn execute(
    args: &DocumentsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.provider == "memory" {
        output::print_warning("database.provider is 'memory'; the record store starts empty");
    }
    let store = Arc::new(DocumentStore::connect(&config.database).await?);
    let lookup = LookupService::new(store, config.review.clone());

    match &args.command {
        DocumentsCommand::List {
            doc_type,
            status,
            date,
            q,
        } => {
            let docs = lookup
                .search(DocumentQuery {
                    doc_type: doc_type.clone(),
                    status: status.clone(),
                    date: date.clone(),
                    submitter: q.clone(),
                })
                .await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<DocumentRow> = docs.iter().map(DocumentRow::from).collect();
                    output::print_list(&rows, format);
                }
                OutputFormat::Json => output::print_item(&docs, format),
            }
        }
        DocumentsCommand::Show { id } => {
            let doc = lookup.get(parse_id(id)?).await?;
            output::print_item(&doc, format);
        }
        DocumentsCommand::SetStatus { id, status } => {
            let doc = lookup.update_status(parse_id(id)?, status).await?;
            output::print_success(&format!("Document {} is now {}", doc.id, doc.status));
        }
    }

    Ok(())
}
