//! Route definitions for the VaultDocs HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the request body limit, and
/// request logging.
pub fn build_router(state: AppState) -> Router {
    let max_request = state.config.intake.max_request_bytes();

    let api_routes = Router::new()
        .merge(document_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_request))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Document upload, listing, review, and download
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::document::list_documents))
        .route("/documents/upload", post(handlers::document::upload_documents))
        .route(
            "/documents/{id}",
            get(handlers::document::get_document).put(handlers::document::update_status),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::document::download_file),
        )
}

/// Liveness and dependency checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
