//! Integration tests for health endpoints.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_health_detailed_reports_backends() {
    let app = TestApp::new().await;

    let response = app.get("/api/health/detailed").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"]["provider"], "memory");
    assert_eq!(response.body["database"]["status"], "ok");
    assert_eq!(response.body["storage"]["provider"], "local");
    assert_eq!(response.body["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_startup_sweep_clears_stale_staging() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("uploads").join("staging");
    std::fs::create_dir_all(&staging).unwrap();
    std::fs::write(staging.join("stale.part"), b"%PDF-1.4").unwrap();

    let root = dir.path().join("uploads").to_string_lossy().to_string();
    let app = TestApp::with_config(move |c| c.storage.root_path = root).await;

    assert!(!staging.join("stale.part").exists());
    assert_eq!(app.get("/api/health").await.status, StatusCode::OK);
}
