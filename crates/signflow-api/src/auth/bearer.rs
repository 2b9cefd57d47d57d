use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use signflow_core::models::Credential;
use signflow_core::AppError;

use crate::error::HttpAppError;

const MISSING_HEADER: &str = "Missing or invalid Authorization header.";
const SCHEME: &str = "bearer ";

/// Parse an `Authorization` header value into a credential.
///
/// The scheme word is matched case-insensitively; the remainder is trimmed.
/// No signature or expiry checks happen here.
pub fn extract_bearer(header: Option<&str>) -> Result<Credential, AppError> {
    let value = header
        .map(str::trim_start)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::MissingCredential(MISSING_HEADER.to_string()))?;

    // The trailing space may have been trimmed off a bare "Bearer ".
    let has_scheme = value
        .get(..SCHEME.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCHEME))
        || value.trim_end().eq_ignore_ascii_case(SCHEME.trim_end());
    if !has_scheme {
        return Err(AppError::MissingCredential(MISSING_HEADER.to_string()));
    }

    let token = value.get(SCHEME.len()..).unwrap_or_default();
    Credential::new(token)
}

/// Caller credential taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Credential);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        Ok(BearerToken(extract_bearer(header)?))
    }
}
