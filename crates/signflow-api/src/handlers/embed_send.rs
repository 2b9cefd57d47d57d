use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use signflow_core::models::EmbedSendResult;
use signflow_infra::RequestId;

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_signing_form;

/// Upload a file, place a signature field and open an embedded-sending session.
#[utoipa::path(
    post,
    path = "/api/documents/embed-send",
    tag = "signing",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: `file` (required), `workflow` (`parallel`|`sequential`), `uploaderUserId` (optional)"),
    responses(
        (status = 200, description = "Embedded sending session created", body = EmbedSendResult),
        (status = 400, description = "Missing file or invalid workflow", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 502, description = "Provider returned an incomplete response", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn embed_send(
    State(state): State<Arc<AppState>>,
    BearerToken(credential): BearerToken,
    request_id: Option<Extension<RequestId>>,
    multipart: Multipart,
) -> Result<Json<EmbedSendResult>, HttpAppError> {
    let form = extract_signing_form(multipart).await?;
    let ctx = state.call_context(super::trace_id(request_id));
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .signing
        .embed_send
        .embed_and_send(
            form.file,
            &credential,
            form.workflow.as_deref(),
            form.uploader_user_id,
            &ctx,
        )
        .await?;

    Ok(Json(result))
}
