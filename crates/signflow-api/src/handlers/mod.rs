pub mod documents;
pub mod download;
pub mod embed_send;
pub mod embedded;
pub mod fields;
pub mod health;
pub mod signing_links;
pub mod signnow_auth;
pub mod upload;

use axum::http::StatusCode;
use axum::response::Response;
use signflow_core::models::{DocumentReference, RawResponse};
use signflow_core::AppError;
use signflow_infra::RequestId;

fn trace_id(request_id: Option<axum::Extension<RequestId>>) -> Option<String> {
    request_id.map(|axum::Extension(id)| id.0)
}

fn document_ref(document_id: String) -> Result<DocumentReference, AppError> {
    DocumentReference::new(document_id)
        .ok_or_else(|| AppError::InvalidInput("documentId is required.".to_string()))
}

fn raw_response(raw: RawResponse) -> Response {
    let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);
    crate::error::provider_response(status, raw.body)
}
