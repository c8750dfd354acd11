//! Integration tests for upload, listing, and review.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use vaultdocs_entity::document::DocumentType;

use helpers::{MultipartForm, TestApp};

#[tokio::test]
async fn test_upload_single_identity_card() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            MultipartForm::new()
                .text("name", "Jane Doe")
                .text("email", "jane@x.com")
                .text("docTypes", "identity-card")
                .pdf("documents", "id-front.pdf"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Document uploaded successfully");

    let doc = &response.body["document"];
    assert_eq!(doc["name"], "Jane Doe");
    assert_eq!(doc["email"], "jane@x.com");
    assert_eq!(doc["status"], "Pending");
    assert_eq!(
        doc["files"]["identity-card"],
        json!(["identity-card-jane_doe.pdf"])
    );

    let stored = std::fs::read(app.stored_path("identity-card-jane_doe.pdf")).unwrap();
    assert_eq!(stored, helpers::PDF_BYTES);
    assert_eq!(app.staged_count(), 0);
}

#[tokio::test]
async fn test_upload_multiple_files_of_one_type() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            MultipartForm::new()
                .text("name", "Jane Doe")
                .text("email", "jane@x.com")
                .text("docTypes", "transcript")
                .text("docTypes", "transcript")
                .text("docType", "resume")
                .pdf("documents", "t1.pdf")
                .pdf("documents", "t2.pdf")
                .pdf("document", "cv.pdf"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let files = &response.body["document"]["files"];
    assert_eq!(
        files["transcript"],
        json!(["transcript-jane_doe.pdf", "transcript-jane_doe-2.pdf"])
    );
    assert_eq!(files["resume"], json!(["resume-jane_doe.pdf"]));
    assert!(app.stored_path("transcript-jane_doe-2.pdf").exists());
}

#[tokio::test]
async fn test_mismatched_counts_rejected_without_record() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            MultipartForm::new()
                .text("name", "Jane Doe")
                .text("email", "jane@x.com")
                .text("docTypes", "passport")
                .pdf("documents", "a.pdf")
                .pdf("documents", "b.pdf"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "Number of files (2) does not match number of document types (1)"
    );
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let list = app.get("/api/documents").await;
    assert_eq!(list.body, json!([]));
    assert_eq!(app.staged_count(), 0);
}

#[tokio::test]
async fn test_upload_validation_failures() {
    let app = TestApp::new().await;
    let long_email = format!("{}@x.com", "a".repeat(250));

    let cases = [
        MultipartForm::new()
            .text("name", "Jane Doe")
            .text("email", "jane@x.com"),
        MultipartForm::new()
            .text("name", "J4ne")
            .text("email", "jane@x.com")
            .text("docTypes", "passport")
            .pdf("documents", "a.pdf"),
        MultipartForm::new()
            .text("name", "Jane Doe")
            .text("email", "not-an-email")
            .text("docTypes", "passport")
            .pdf("documents", "a.pdf"),
        MultipartForm::new()
            .text("name", "Jane Doe")
            .text("email", &long_email)
            .text("docTypes", "passport")
            .pdf("documents", "a.pdf"),
        MultipartForm::new()
            .text("name", "Jane Doe")
            .text("email", "jane@x.com")
            .text("docTypes", "selfie")
            .pdf("documents", "a.pdf"),
        MultipartForm::new()
            .text("name", "Jane Doe")
            .text("email", "jane@x.com")
            .text("docTypes", "passport")
            .file("documents", "photo.png", "image/png", b"\x89PNG\r\n\x1a\n0000"),
    ];

    for form in cases {
        let response = app.upload(form).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
    }

    assert_eq!(app.get("/api/documents").await.body, json!([]));
}

#[tokio::test]
async fn test_required_types_enforced() {
    let app = TestApp::with_config(|c| {
        c.intake.required_types = vec!["identity-card".into(), "tax-id".into()];
    })
    .await;

    let response = app
        .upload(
            MultipartForm::new()
                .text("name", "Jane Doe")
                .text("email", "jane@x.com")
                .text("docTypes", "identity-card")
                .pdf("documents", "a.pdf"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Missing required document types: tax-id");
}

#[tokio::test]
async fn test_append_to_existing_record() {
    let app = TestApp::new().await;
    let doc = app.upload_one("identity-card").await;
    let id = doc["id"].as_str().unwrap();

    let response = app
        .upload(
            MultipartForm::new()
                .text("name", "jane doe")
                .text("email", "JANE@x.com")
                .text("documentId", id)
                .text("docTypes", "passport")
                .pdf("documents", "passport.pdf"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let files = &response.body["document"]["files"];
    assert_eq!(files["identity-card"], json!(["identity-card-jane_doe.pdf"]));
    assert_eq!(files["passport"], json!(["passport-jane_doe.pdf"]));
    assert_eq!(response.body["document"]["id"], doc["id"]);

    let list = app.get("/api/documents").await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_append_requires_matching_owner_and_known_id() {
    let app = TestApp::new().await;
    let doc = app.upload_one("identity-card").await;
    let id = doc["id"].as_str().unwrap();

    let wrong_owner = app
        .upload(
            MultipartForm::new()
                .text("name", "John Roe")
                .text("email", "john@x.com")
                .text("documentId", id)
                .text("docTypes", "passport")
                .pdf("documents", "p.pdf"),
        )
        .await;
    assert_eq!(wrong_owner.status, StatusCode::BAD_REQUEST);
    assert!(!app.stored_path("passport-john_roe.pdf").exists());

    let unknown = app
        .upload(
            MultipartForm::new()
                .text("name", "Jane Doe")
                .text("email", "jane@x.com")
                .text("documentId", "00000000-0000-0000-0000-000000000001")
                .text("docTypes", "passport")
                .pdf("documents", "p.pdf"),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "Document not found");
}

#[tokio::test]
async fn test_get_document() {
    let app = TestApp::new().await;
    let doc = app.upload_one("passport").await;
    let id = doc["id"].as_str().unwrap();

    let response = app.get(&format!("/api/documents/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, doc);

    let missing = app
        .get("/api/documents/00000000-0000-0000-0000-000000000001")
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::new().await;
    let doc = app.upload_one("identity-card").await;
    let path = format!("/api/documents/{}", doc["id"].as_str().unwrap());

    let response = app
        .request("PUT", &path, Some(json!({ "status": "Verified" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Status updated");
    assert_eq!(response.body["document"]["status"], "Verified");

    let invalid = app
        .request("PUT", &path, Some(json!({ "status": "Approved" })))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.message(), "Invalid status value");
    assert_eq!(app.get(&path).await.body["status"], "Verified");

    let missing_field = app.request("PUT", &path, Some(json!({}))).await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "PUT",
            "/api/documents/00000000-0000-0000-0000-000000000001",
            Some(json!({ "status": "Rejected" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_decided_status_is_terminal_without_reopen() {
    let app = TestApp::with_config(|c| c.review.allow_reopen = false).await;
    let doc = app.upload_one("identity-card").await;
    let path = format!("/api/documents/{}", doc["id"].as_str().unwrap());

    let rejected = app
        .request("PUT", &path, Some(json!({ "status": "Rejected" })))
        .await;
    assert_eq!(rejected.status, StatusCode::OK);

    let again = app
        .request("PUT", &path, Some(json!({ "status": "Rejected" })))
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let reopen = app
        .request("PUT", &path, Some(json!({ "status": "Pending" })))
        .await;
    assert_eq!(reopen.status, StatusCode::CONFLICT);
    assert_eq!(reopen.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_list_filters_and_ordering() {
    let app = TestApp::new().await;
    let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let first = app
        .seed("Jane Doe", "jane@x.com", DocumentType::IdentityCard, morning)
        .await;
    let second = app
        .seed(
            "John Roe",
            "john@example.org",
            DocumentType::Passport,
            morning + Duration::hours(5),
        )
        .await;
    let next_day = app
        .seed(
            "Ann Lee",
            "ann@z.com",
            DocumentType::Resume,
            morning + Duration::days(1),
        )
        .await;

    let all = app.get("/api/documents").await;
    assert_eq!(all.status, StatusCode::OK);
    let ids: Vec<&str> = all
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            next_day.id.to_string(),
            second.id.to_string(),
            first.id.to_string()
        ]
    );

    let by_type = app.get("/api/documents?docType=passport").await;
    assert_eq!(by_type.body.as_array().unwrap().len(), 1);
    assert_eq!(by_type.body[0]["name"], "John Roe");

    let by_q = app.get("/api/documents?q=JANE").await;
    assert_eq!(by_q.body.as_array().unwrap().len(), 1);
    assert_eq!(by_q.body[0]["email"], "jane@x.com");

    let by_email_part = app.get("/api/documents?submitter=example.org").await;
    assert_eq!(by_email_part.body.as_array().unwrap().len(), 1);

    app.request(
        "PUT",
        &format!("/api/documents/{}", first.id),
        Some(json!({ "status": "Verified" })),
    )
    .await;
    let verified = app.get("/api/documents?status=Verified").await;
    assert_eq!(verified.body.as_array().unwrap().len(), 1);
    assert_eq!(verified.body[0]["id"], first.id.to_string());

    let on_day = app.get("/api/documents?date=2024-03-01").await;
    let day_ids: Vec<&str> = on_day
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(day_ids, [second.id.to_string(), first.id.to_string()]);

    let before = app.get("/api/documents?date=2024-02-29").await;
    assert_eq!(before.body, json!([]));
}

#[tokio::test]
async fn test_list_rejects_invalid_filters() {
    let app = TestApp::new().await;

    for query in ["status=Approved", "docType=selfie", "date=2024-13-01"] {
        let response = app.get(&format!("/api/documents?{query}")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
    }
}
