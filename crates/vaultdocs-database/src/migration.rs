//! Schema migration runner.

use std::collections::HashSet;

use sqlx::PgPool;
use sqlx::migrate::Migrate;
use tracing::info;

use vaultdocs_core::error::{AppError, ErrorKind};
use vaultdocs_core::result::AppResult;

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying document schema migrations");

    let migrator = sqlx::migrate!("../../migrations");
    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(
        migrations = migrator.iter().count(),
        "Document schema is up to date"
    );
    Ok(())
}

/// A known migration and whether it has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migration version (timestamp prefix of the file name).
    pub version: i64,
    /// Description taken from the file name.
    pub description: String,
    /// Whether the database has recorded it as applied.
    pub applied: bool,
}

/// Compare the embedded migrations against those recorded in the database.
pub async fn migration_status(pool: &PgPool) -> AppResult<Vec<MigrationStatus>> {
    let migrator = sqlx::migrate!("../../migrations");
    let mut conn = pool.acquire().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
    })?;

    let map_err = |e: sqlx::migrate::MigrateError| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to read migration history: {e}"),
            e,
        )
    };
    conn.ensure_migrations_table().await.map_err(map_err)?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await
        .map_err(map_err)?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(migrator
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
