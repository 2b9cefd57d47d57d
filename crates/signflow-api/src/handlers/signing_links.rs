use axum::{extract::State, response::Response};
use serde::Deserialize;
use signflow_core::models::Credential;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::SigningState;

/// The access token travels in the body on this route.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigningLinkRequest {
    #[serde(default)]
    pub token: String,
    #[validate(length(min = 1, message = "documentId is required."))]
    #[serde(default)]
    pub document_id: String,
    pub redirect_uri: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/signing-links",
    tag = "signing",
    request_body = SigningLinkRequest,
    responses(
        (status = 200, description = "Provider signing link response", content_type = "application/json"),
        (status = 400, description = "Missing document id", body = ErrorResponse),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    )
)]
pub async fn create_signing_link(
    State(signing): State<SigningState>,
    ValidatedJson(request): ValidatedJson<SigningLinkRequest>,
) -> Result<Response, HttpAppError> {
    let credential = Credential::new(request.token.as_str())?;
    request.validate().map_err(signflow_core::AppError::from)?;
    let document = super::document_ref(request.document_id)?;

    let raw = signing
        .gateway
        .create_signing_link(&document, &credential, request.redirect_uri.as_deref())
        .await?;
    Ok(super::raw_response(raw))
}
