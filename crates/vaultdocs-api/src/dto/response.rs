//! Response DTOs.

use serde::{Deserialize, Serialize};

use vaultdocs_entity::document::DocumentRecord;

/// A message paired with the affected record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    /// Human-readable outcome.
    pub message: String,
    /// The record after the operation.
    pub document: DocumentRecord,
}

impl DocumentEnvelope {
    /// Creates an envelope.
    pub fn new(message: impl Into<String>, document: DocumentRecord) -> Self {
        Self {
            message: message.into(),
            document,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Health of one backing component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Backend name (`postgres`, `memory`, `local`).
    pub provider: String,
    /// `"ok"` or `"unavailable"`.
    pub status: String,
}

impl ComponentHealth {
    /// Builds a component entry from a health check result.
    pub fn new(provider: &str, healthy: bool) -> Self {
        Self {
            provider: provider.to_string(),
            status: if healthy { "ok" } else { "unavailable" }.to_string(),
        }
    }

    /// Whether the component reported healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Dependency health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` when every component is healthy, otherwise `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Record store.
    pub database: ComponentHealth,
    /// File storage.
    pub storage: ComponentHealth,
}
