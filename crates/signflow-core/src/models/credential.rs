use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::error::AppError;

/// Caller-supplied bearer token, forwarded verbatim to the signing provider.
///
/// The value is never logged: `Debug` prints a redacted placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(AppError::MissingCredential(
                "Invalid or missing access token.".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Credential(***)")
    }
}
