use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use signflow_core::models::EmbedSendResult;
use signflow_infra::RequestId;
use utoipa::IntoParams;

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmbeddedSendingQuery {
    /// `parallel` or `sequential`
    pub workflow: Option<String>,
    pub uploader_user_id: Option<String>,
}

/// Create an embedded-sending session for an uploaded document and report it.
#[utoipa::path(
    post,
    path = "/api/documents/{documentId}/embedded-sending",
    tag = "signing",
    params(
        ("documentId" = String, Path, description = "Provider document id"),
        EmbeddedSendingQuery
    ),
    responses(
        (status = 200, description = "Session created", body = EmbedSendResult),
        (status = 400, description = "Invalid workflow", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 502, description = "Provider returned no URL", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_embedded_sending(
    State(state): State<Arc<AppState>>,
    BearerToken(credential): BearerToken,
    request_id: Option<Extension<RequestId>>,
    Path(document_id): Path<String>,
    Query(query): Query<EmbeddedSendingQuery>,
) -> Result<Json<EmbedSendResult>, HttpAppError> {
    let document = super::document_ref(document_id)?;
    let ctx = state.call_context(super::trace_id(request_id));
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .signing
        .embed_send
        .create_session_and_report(
            &document,
            &credential,
            query.workflow.as_deref(),
            query.uploader_user_id,
            &ctx,
        )
        .await?;

    Ok(Json(result))
}
