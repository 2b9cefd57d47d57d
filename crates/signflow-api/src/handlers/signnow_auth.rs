use axum::{extract::State, response::Response};
use serde::Deserialize;
use signflow_core::AppError;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::SigningState;

#[derive(Deserialize, Validate, ToSchema)]
pub struct PasswordGrantRequest {
    #[validate(length(min = 1, message = "username is required."))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, message = "password is required."))]
    #[serde(default)]
    pub password: String,
}

/// Exchange provider username and password for an access token.
#[utoipa::path(
    post,
    path = "/api/signnow/auth",
    tag = "auth",
    request_body = PasswordGrantRequest,
    responses(
        (status = 200, description = "Provider token response", content_type = "application/json"),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 500, description = "Basic token not configured", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    )
)]
pub async fn password_grant(
    State(signing): State<SigningState>,
    ValidatedJson(request): ValidatedJson<PasswordGrantRequest>,
) -> Result<Response, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let raw = signing
        .gateway
        .password_grant(&request.username, &request.password)
        .await?;
    Ok(super::raw_response(raw))
}
