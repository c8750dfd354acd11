//! PostgreSQL document repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use vaultdocs_core::error::{AppError, ErrorKind};
use vaultdocs_core::result::AppResult;
use vaultdocs_core::types::DocumentId;
use vaultdocs_entity::document::{DocumentFiles, DocumentFilter, DocumentRecord, DocumentStatus};

use super::DocumentRepository;

const COLUMNS: &str = "id, name, email, submitted_at, updated_at, status, files";

/// Row shape of the `documents` table.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    name: String,
    email: String,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status: DocumentStatus,
    files: Json<DocumentFiles>,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            submitted_at: row.submitted_at,
            updated_at: row.updated_at,
            status: row.status,
            files: row.files.0,
        }
    }
}

/// Repository backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

/// Escape `LIKE` metacharacters so user text matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Build the list query for `filter`.
fn list_query(filter: &DocumentFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM documents WHERE TRUE"));

    if let Some(doc_type) = filter.doc_type {
        qb.push(" AND jsonb_array_length(files -> ")
            .push_bind(doc_type.as_str())
            .push(") > 0");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some((start, end)) = filter.submitted_between() {
        qb.push(" AND submitted_at >= ")
            .push_bind(start)
            .push(" AND submitted_at < ")
            .push_bind(end);
    }
    if let Some(needle) = filter.submitter_needle() {
        let pattern = like_pattern(needle);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY submitted_at DESC, id ASC");
    qb
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(db_error("Health check failed"))
    }

    async fn create(&self, record: &DocumentRecord) -> AppResult<DocumentRecord> {
        sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        ))
        .bind(record.id.into_uuid())
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.submitted_at)
        .bind(record.updated_at)
        .bind(record.status)
        .bind(Json(&record.files))
        .fetch_one(&self.pool)
        .await
        .map(DocumentRecord::from)
        .map_err(db_error("Failed to create document record"))
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<DocumentRecord>> {
        sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(DocumentRecord::from))
        .map_err(db_error("Failed to find document record"))
    }

    async fn list(&self, filter: &DocumentFilter) -> AppResult<Vec<DocumentRecord>> {
        let mut qb = list_query(filter);
        let rows = qb
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list document records"))?;
        Ok(rows.into_iter().map(DocumentRecord::from).collect())
    }

    async fn set_files(
        &self,
        id: DocumentId,
        files: &DocumentFiles,
    ) -> AppResult<Option<DocumentRecord>> {
        sqlx::query_as::<_, DocumentRow>(&format!(
            "UPDATE documents SET files = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.into_uuid())
        .bind(Json(files))
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(DocumentRecord::from))
        .map_err(db_error("Failed to update document files"))
    }

    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> AppResult<Option<DocumentRecord>> {
        sqlx::query_as::<_, DocumentRow>(&format!(
            "UPDATE documents SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.into_uuid())
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(DocumentRecord::from))
        .map_err(db_error("Failed to update document status"))
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete document record"))
    }
}
