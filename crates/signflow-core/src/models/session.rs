use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider-hosted embedded-sending link. The URL is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSession {
    pub url: String,
}

/// Terminal success value returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbedSendResult {
    pub document_id: String,
    pub embedded_sending_url: String,
}
