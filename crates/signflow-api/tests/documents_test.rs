//! Standalone signing and document route tests.
//!
//! Run with: `cargo test -p signflow-api --test documents_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, RECORDER_PATH, TOKEN};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_standalone_upload_returns_document_id() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("POST", "/document")
        .with_status(200)
        .with_body(r#"{"id":"doc-5"}"#)
        .create_async()
        .await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"hello".to_vec()).file_name("note.txt"),
    );
    let response = app
        .server
        .post("/api/upload")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .multipart(form)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "document_id": "doc-5" }));
}

#[tokio::test]
async fn test_upload_without_file_is_bad_request() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("workflow", "parallel");
    let response = app
        .server
        .post("/api/upload")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No file provided.");
}

#[tokio::test]
async fn test_signature_field_overrides() {
    let mut app = setup_test_app().await;
    let mock = app
        .provider
        .mock("PUT", "/document/doc-1")
        .match_body(Matcher::PartialJson(json!({
            "fields": [{ "type": "signature", "page_number": 2, "x": 10, "role": "Signer 1" }]
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let response = app
        .server
        .put("/api/documents/doc-1/fields/signature")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .add_query_param("pageNumber", 2)
        .add_query_param("x", 10)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_signature_field_rejects_zero_width() {
    let app = setup_test_app().await;

    let response = app
        .server
        .put("/api/documents/doc-1/fields/signature")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .add_query_param("width", 0)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_embedded_sending_reports_without_file_metadata() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("POST", "/v2/documents/doc-3/embedded-sending")
        .with_status(200)
        .with_body(r#"{"data":{"url":"https://sign.example/s/doc-3"}}"#)
        .create_async()
        .await;
    let recorder = app
        .provider
        .mock("POST", RECORDER_PATH)
        .match_body(Matcher::PartialJson(json!({
            "signNowDocumentId": "doc-3",
            "workflow": "sequential",
            "uploaderUserId": "7"
        })))
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let response = app
        .server
        .post("/api/documents/doc-3/embedded-sending")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .add_query_param("workflow", "sequential")
        .add_query_param("uploaderUserId", "7")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["embedded_sending_url"],
        "https://sign.example/s/doc-3"
    );
    recorder.assert_async().await;
}

#[tokio::test]
async fn test_list_documents_passes_through() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("GET", "/document")
        .with_status(200)
        .with_body(r#"[{"id":"doc-1"}]"#)
        .create_async()
        .await;

    let response = app
        .server
        .get("/api/document/list-documents")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), r#"[{"id":"doc-1"}]"#);
}

#[tokio::test]
async fn test_download_sets_attachment_headers() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("GET", "/document/doc-1/download")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.4")
        .create_async()
        .await;

    let response = app
        .server
        .get("/api/download/doc-1")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"signnow_doc-1.pdf\"; filename*=UTF-8''signnow_doc-1.pdf"
    );
    assert_eq!(response.text(), "%PDF-1.4");
}

#[tokio::test]
async fn test_download_rejection_is_forwarded_verbatim() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("GET", "/document/gone/download")
        .with_status(404)
        .with_body(r#"{"errors":[{"code":65582,"message":"Document not found"}]}"#)
        .create_async()
        .await;

    let response = app
        .server
        .get("/api/download/gone")
        .add_header("Authorization", format!("Bearer {}", TOKEN))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.text(),
        r#"{"errors":[{"code":65582,"message":"Document not found"}]}"#
    );
}

#[tokio::test]
async fn test_signing_link_uses_body_token() {
    let mut app = setup_test_app().await;
    let mock = app
        .provider
        .mock("POST", "/link")
        .match_header("authorization", "Bearer body-token")
        .match_body(Matcher::Json(json!({
            "document_id": "doc-1",
            "redirect_uri": "https://app.example/done"
        })))
        .with_status(200)
        .with_body(r#"{"url":"https://sign.example/l/1"}"#)
        .create_async()
        .await;

    let response = app
        .server
        .post("/api/signing-links")
        .json(&json!({
            "token": "body-token",
            "documentId": "doc-1",
            "redirectUri": "https://app.example/done"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["url"], "https://sign.example/l/1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_signing_link_without_token_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/signing-links")
        .json(&json!({ "documentId": "doc-1" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_password_grant_passes_through() {
    let mut app = setup_test_app().await;
    app.provider
        .mock("POST", "/oauth2/token")
        .match_header("authorization", "Basic YmFzaWM=")
        .with_status(200)
        .with_body(r#"{"access_token":"abc","expires_in":2592000}"#)
        .create_async()
        .await;

    let response = app
        .server
        .post("/api/signnow/auth")
        .json(&json!({ "username": "ada@example.com", "password": "secret" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["access_token"], "abc");
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");

    let response = app
        .server
        .get("/live")
        .add_header("X-Request-ID", "trace-abc")
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "trace-abc");
}
