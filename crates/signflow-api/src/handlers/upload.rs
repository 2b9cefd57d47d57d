use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_signing_form;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub document_id: String,
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "signing",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document uploaded", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    BearerToken(credential): BearerToken,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = extract_signing_form(multipart).await?;
    let ctx = state.call_context(None);
    let _guard = ctx.cancel.clone().drop_guard();

    let document = state
        .signing
        .embed_send
        .upload_only(form.file, &credential, &ctx)
        .await?;

    Ok(Json(UploadResponse {
        document_id: document.into_inner(),
    }))
}
