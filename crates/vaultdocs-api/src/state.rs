//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vaultdocs_core::config::AppConfig;
use vaultdocs_database::DocumentStore;
use vaultdocs_service::{IntakeService, LookupService, RetrievalService};
use vaultdocs_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record store (PostgreSQL or in-memory)
    pub store: Arc<DocumentStore>,
    /// Storage provider and staging area
    pub storage_manager: Arc<StorageManager>,

    // ── Services ─────────────────────────────────────────────
    /// Upload intake
    pub intake_service: Arc<IntakeService>,
    /// Listing and review decisions
    pub lookup_service: Arc<LookupService>,
    /// File downloads
    pub retrieval_service: Arc<RetrievalService>,
}
