//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vaultdocs_core::config::AppConfig;
use vaultdocs_database::DocumentStore;
use vaultdocs_database::repositories::DocumentRepository;
use vaultdocs_entity::document::{DocumentFiles, DocumentRecord, DocumentType};

/// Minimal PDF accepted by the intake checks.
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%integration\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

const BOUNDARY: &str = "vaultdocs-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Local storage root
    pub storage_root: PathBuf,
    /// Record store shared with the router
    pub store: Arc<DocumentStore>,
    _dir: TempDir,
}

impl TestApp {
    /// Create a test application with the in-memory record store and local
    /// storage in a temporary directory.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`], with a hook to adjust the configuration.
    pub async fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage_root = dir.path().join("uploads");

        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.storage.provider = "local".to_string();
        config.storage.root_path = storage_root.to_string_lossy().to_string();
        configure(&mut config);

        let state = vaultdocs_api::build_state(config.clone())
            .await
            .expect("Failed to build app state");
        let store = state.store.clone();
        let router = vaultdocs_api::build_app(state);

        Self {
            router,
            config,
            storage_root,
            store,
            _dir: dir,
        }
    }

    /// Path of a stored file on disk.
    pub fn stored_path(&self, key: &str) -> PathBuf {
        self.storage_root.join(key)
    }

    /// Number of files left in the staging directory.
    pub fn staged_count(&self) -> usize {
        let staging = self.storage_root.join(&self.config.storage.staging_prefix);
        count_files(&staging)
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::get(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a multipart form to the upload endpoint
    pub async fn upload(&self, form: MultipartForm) -> TestResponse {
        let req = Request::post("/api/documents/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.finish()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload one PDF for Jane Doe and return the created record.
    pub async fn upload_one(&self, doc_type: &str) -> Value {
        let response = self
            .upload(
                MultipartForm::new()
                    .text("name", "Jane Doe")
                    .text("email", "jane@x.com")
                    .text("docTypes", doc_type)
                    .pdf("documents", "scan.pdf"),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.body["document"].clone()
    }

    /// Insert a record directly into the store with a fixed submission time.
    pub async fn seed(
        &self,
        name: &str,
        email: &str,
        doc_type: DocumentType,
        submitted_at: DateTime<Utc>,
    ) -> DocumentRecord {
        let mut files = DocumentFiles::new();
        files
            .entry(doc_type)
            .or_default()
            .push(format!("{doc_type}-seeded.pdf"));
        let mut record = DocumentRecord::new(name, email, files);
        record.submitted_at = submitted_at;
        record.updated_at = submitted_at;
        self.store
            .create(&record)
            .await
            .expect("Failed to seed record")
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes: bytes.to_vec(),
            body,
        }
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of a JSON body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// A header value as text.
    pub fn header(&self, name: header::HeaderName) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Hand-built `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a PDF file field
    pub fn pdf(self, name: &str, file_name: &str) -> Self {
        self.file(name, file_name, "application/pdf", PDF_BYTES)
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
