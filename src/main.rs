//! VaultDocs Server: document upload and review service
//!
//! Main entry point that loads configuration and starts the HTTP server.

use vaultdocs_core::config::AppConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env = std::env::var("VAULTDOCS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    vaultdocs_api::init_logging(&config.logging);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = vaultdocs_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
