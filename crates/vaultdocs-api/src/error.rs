//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use vaultdocs_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error: an [`AppError`] that renders as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status and error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if self.0.kind.is_server_error() {
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?self.0.source,
                "Request failed"
            );
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status_and_code().0, expected);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError(AppError::not_found("Document not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
