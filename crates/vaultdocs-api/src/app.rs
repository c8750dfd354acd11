//! Application builder: wires stores, services, router and middleware.

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vaultdocs_core::config::AppConfig;
use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;
use vaultdocs_database::DocumentStore;
use vaultdocs_database::repositories::DocumentRepository;
use vaultdocs_service::{IntakeService, LookupService, RetrievalService};
use vaultdocs_storage::StorageManager;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Connects the record store and storage backend named in `config` and
/// constructs the services on top of them.
///
/// When `storage.sweep_on_startup` is set, staged uploads left behind by a
/// previous process are removed before the state is returned.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    info!(provider = %config.database.provider, "Initializing record store");
    let store = Arc::new(DocumentStore::connect(&config.database).await?);

    info!(provider = %config.storage.provider, "Initializing storage");
    let storage_manager = Arc::new(StorageManager::new(&config.storage).await?);

    if config.storage.sweep_on_startup {
        let removed = storage_manager.staging().sweep(Duration::zero()).await?;
        info!(removed, "Startup sweep of staged uploads complete");
    }

    let records: Arc<dyn DocumentRepository> = store.clone();
    let intake_service = Arc::new(IntakeService::new(
        Arc::clone(&records),
        storage_manager.as_ref().clone(),
        config.intake.clone(),
    )?);
    let lookup_service = Arc::new(LookupService::new(
        Arc::clone(&records),
        config.review.clone(),
    ));
    let retrieval_service = Arc::new(RetrievalService::new(
        records,
        storage_manager.provider(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        store,
        storage_manager,
        intake_service,
        lookup_service,
        retrieval_service,
    })
}

/// Runs the VaultDocs server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting VaultDocs v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.bind_address();
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("VaultDocs server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("VaultDocs server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
