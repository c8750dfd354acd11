//! Document upload, listing, review, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tracing::info;
use validator::Validate;

use vaultdocs_core::error::AppError;
use vaultdocs_core::types::DocumentId;
use vaultdocs_entity::document::DocumentRecord;
use vaultdocs_service::{IntakeRequest, UploadedFile};

use crate::dto::request::{DownloadQuery, ListDocumentsQuery, UpdateStatusRequest};
use crate::dto::response::DocumentEnvelope;
use crate::error::ApiError;
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.trim()
        .parse::<DocumentId>()
        .map_err(|_| AppError::validation(format!("Invalid document id: '{raw}'")).into())
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation(format!("Invalid multipart body: {}", e.body_text()))
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

/// POST /api/documents/upload
///
/// Multipart fields: `name`, `email`, files under `documents` (or
/// `document`), one `docTypes` (or `docType`) per file, and an optional
/// `documentId` to append to an existing record.
pub async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentEnvelope>), ApiError> {
    let mut request = IntakeRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => request.name = field_text(field).await?,
            "email" => request.email = field_text(field).await?,
            "docTypes" | "docTypes[]" | "docType" => {
                request.doc_types.push(field_text(field).await?);
            }
            "documentId" => {
                let raw = field_text(field).await?;
                if !raw.trim().is_empty() {
                    request.document_id = Some(parse_id(&raw)?);
                }
            }
            "documents" | "document" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was picked.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                request.files.push(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let outcome = state.intake_service.submit(request).await?;
    let (status, message) = if outcome.created {
        (StatusCode::CREATED, "Document uploaded successfully")
    } else {
        (StatusCode::OK, "Documents added successfully")
    };

    Ok((status, Json(DocumentEnvelope::new(message, outcome.document))))
}

/// GET /api/documents?docType=&status=&date=&q=
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<DocumentRecord>>, ApiError> {
    let documents = state.lookup_service.search(query.into()).await?;
    Ok(Json(documents))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentRecord>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.lookup_service.get(id).await?))
}

/// PUT /api/documents/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<DocumentEnvelope>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let document = state.lookup_service.update_status(id, &req.status).await?;
    info!(document_id = %id, status = %document.status, "Review status set");
    Ok(Json(DocumentEnvelope::new("Status updated", document)))
}

/// GET /api/documents/{id}/download?type=&file=
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let result = state
        .retrieval_service
        .open(id, &query.doc_type, &query.file)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.file_name),
        )
        .header(header::CONTENT_LENGTH, result.size_bytes)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
