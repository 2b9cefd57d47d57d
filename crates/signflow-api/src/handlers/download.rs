use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
};
use futures::StreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use signflow_core::AppError;

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::SigningState;

/// RFC 5987 `attr-char` minus alphanumerics.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// `Content-Disposition` for an attachment: an ASCII-only `filename` fallback
/// plus the exact name as `filename*=UTF-8''...`.
fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' ' => ' ',
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

#[utoipa::path(
    get,
    path = "/api/download/{documentId}",
    tag = "documents",
    params(
        ("documentId" = String, Path, description = "Provider document id")
    ),
    responses(
        (status = 200, description = "Document file", content_type = "application/pdf"),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(signing, credential))]
pub async fn download_document(
    State(signing): State<SigningState>,
    BearerToken(credential): BearerToken,
    Path(document_id): Path<String>,
) -> Result<Response<Body>, HttpAppError> {
    let document = super::document_ref(document_id)?;
    let downloaded = signing.gateway.download(&document, &credential).await?;

    let body_stream = downloaded
        .stream
        .map(|chunk| chunk.map_err(|e| std::io::Error::other(format!("Download stream error: {}", e))));

    let content_disposition = attachment_disposition(&downloaded.filename);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, downloaded.content_type.as_str())
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
