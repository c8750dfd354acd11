//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered TOML files and environment variables. Each sub-module represents
//! a logical configuration section. Every field carries a serde default so an
//! empty source set still produces a runnable development configuration.

pub mod app;
pub mod database;
pub mod intake;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::intake::{IntakeConfig, ReviewConfig};
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`VAULTDOCS__SERVER__PORT`).
pub const ENV_PREFIX: &str = "VAULTDOCS";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upload intake rules.
    #[serde(default)]
    pub intake: IntakeConfig,
    /// Review workflow policy.
    #[serde(default)]
    pub review: ReviewConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`, `config/{env}.toml`
    /// and the environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from_dir("config", env)
    }

    /// Load configuration from a specific directory.
    ///
    /// Sources, lowest precedence first: `{dir}/default`, `{dir}/{env}`,
    /// `VAULTDOCS__*` variables, then the bare `PORT` and `DATABASE_URL`
    /// variables.
    pub fn load_from_dir(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML document without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty config");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.database.provider, "memory");
        assert_eq!(config.storage.provider, "local");
        assert_eq!(config.intake.max_file_size_bytes, 10 * 1024 * 1024);
        assert!(config.intake.required_types.is_empty());
        assert!(config.review.allow_reopen);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [database]
            provider = "postgres"
            url = "postgres://vault:secret@db:5432/vaultdocs"

            [intake]
            required_types = ["identity-card", "tax-id"]
            max_files_per_request = 3

            [review]
            allow_reopen = false
            "#,
        )
        .expect("valid config");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.intake.required_types, vec!["identity-card", "tax-id"]);
        assert_eq!(config.intake.max_files_per_request, 3);
        assert!(!config.review.allow_reopen);
    }

    #[test]
    fn test_invalid_type_is_configuration_error() {
        let err = AppConfig::from_toml_str("[server]\nport = \"not-a-port\"").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
