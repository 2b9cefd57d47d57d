use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use signflow_core::models::SignatureFieldOverrides;

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Add one signature field; unspecified coordinates fall back to the defaults.
#[utoipa::path(
    put,
    path = "/api/documents/{documentId}/fields/signature",
    tag = "signing",
    params(
        ("documentId" = String, Path, description = "Provider document id"),
        SignatureFieldOverrides
    ),
    responses(
        (status = 200, description = "Field added: `{\"ok\": true}`", content_type = "application/json"),
        (status = 400, description = "Invalid field parameters", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(state, credential, overrides))]
pub async fn add_signature_field(
    State(state): State<Arc<AppState>>,
    BearerToken(credential): BearerToken,
    Path(document_id): Path<String>,
    Query(overrides): Query<SignatureFieldOverrides>,
) -> Result<Json<Value>, HttpAppError> {
    let document = super::document_ref(document_id)?;
    let spec = overrides.into_spec()?;
    let ctx = state.call_context(None);
    let _guard = ctx.cancel.clone().drop_guard();

    state
        .signing
        .embed_send
        .add_field_only(&document, &credential, &spec, &ctx)
        .await?;

    Ok(Json(json!({ "ok": true })))
}
