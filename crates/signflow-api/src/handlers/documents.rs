use axum::{extract::State, response::Response};

use crate::auth::BearerToken;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::SigningState;

/// List the caller's provider documents. The provider's answer is relayed unchanged.
#[utoipa::path(
    get,
    path = "/api/document/list-documents",
    tag = "documents",
    responses(
        (status = 200, description = "Provider document list", content_type = "application/json"),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_documents(
    State(signing): State<SigningState>,
    BearerToken(credential): BearerToken,
) -> Result<Response, HttpAppError> {
    let raw = signing.gateway.list_documents(&credential).await?;
    Ok(super::raw_response(raw))
}
