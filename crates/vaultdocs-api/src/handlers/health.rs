//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use vaultdocs_database::repositories::DocumentRepository;

use crate::dto::response::{ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
///
/// Responds 503 when either backend fails its check.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealthResponse>) {
    let database_ok = state.store.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Record store health check failed");
        false
    });
    let provider = state.storage_manager.provider();
    let storage_ok = provider.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Storage health check failed");
        false
    });

    let database = ComponentHealth::new(state.store.provider_type(), database_ok);
    let storage = ComponentHealth::new(provider.provider_type(), storage_ok);
    let healthy = database.is_ok() && storage.is_ok();

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(DetailedHealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            storage,
        }),
    )
}
