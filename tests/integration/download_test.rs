//! Integration tests for file downloads.

mod helpers;

use axum::http::{StatusCode, header};

use helpers::{PDF_BYTES, TestApp};

fn download_path(id: &str, doc_type: &str, file: &str) -> String {
    format!("/api/documents/{id}/download?type={doc_type}&file={file}")
}

#[tokio::test]
async fn test_download_listed_file() {
    let app = TestApp::new().await;
    let doc = app.upload_one("identity-card").await;
    let id = doc["id"].as_str().unwrap();

    let response = app
        .get(&download_path(id, "identity-card", "identity-card-jane_doe.pdf"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"identity-card-jane_doe.pdf\""
    );
    assert_eq!(
        response.header(header::CONTENT_LENGTH),
        PDF_BYTES.len().to_string()
    );
    assert_eq!(response.bytes, PDF_BYTES);
}

#[tokio::test]
async fn test_unlisted_file_is_refused_even_when_stored() {
    let app = TestApp::new().await;
    let jane = app.upload_one("identity-card").await;
    let jane_id = jane["id"].as_str().unwrap();

    // Another submitter's file exists on disk but is not on Jane's record.
    app.upload(
        helpers::MultipartForm::new()
            .text("name", "John Roe")
            .text("email", "john@x.com")
            .text("docTypes", "passport")
            .pdf("documents", "p.pdf"),
    )
    .await;
    assert!(app.stored_path("passport-john_roe.pdf").exists());

    for (doc_type, file) in [
        ("passport", "passport-john_roe.pdf"),
        ("passport", "identity-card-jane_doe.pdf"),
        ("identity-card", "passport-john_roe.pdf"),
        ("identity-card", "../identity-card-jane_doe.pdf"),
    ] {
        let response = app.get(&download_path(jane_id, doc_type, file)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{doc_type} {file}");
        assert_eq!(response.message(), "File not found in document records");
    }
}

#[tokio::test]
async fn test_listed_file_missing_on_disk() {
    let app = TestApp::new().await;
    let doc = app.upload_one("tax-id").await;
    let id = doc["id"].as_str().unwrap();
    std::fs::remove_file(app.stored_path("tax-id-jane_doe.pdf")).unwrap();

    let response = app
        .get(&download_path(id, "tax-id", "tax-id-jane_doe.pdf"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "File not found on server");
}

#[tokio::test]
async fn test_download_unknown_record() {
    let app = TestApp::new().await;

    let response = app
        .get(&download_path(
            "00000000-0000-0000-0000-000000000001",
            "passport",
            "passport-jane_doe.pdf",
        ))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Document not found");
}

#[tokio::test]
async fn test_download_requires_type_and_file() {
    let app = TestApp::new().await;
    let doc = app.upload_one("passport").await;
    let id = doc["id"].as_str().unwrap();

    let response = app.get(&format!("/api/documents/{id}/download")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
