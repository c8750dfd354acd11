//! # vaultdocs-api
//!
//! HTTP API layer for VaultDocs built on Axum.
//!
//! Provides the document REST endpoints, health checks, middleware (CORS,
//! request logging), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use logging::init_logging;
pub use state::AppState;
