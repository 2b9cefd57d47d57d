use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{DocumentReference, EmbeddedSession, UploadedFile, WorkflowMode};

/// Record of a completed signing operation, sent once to the recorder service.
///
/// Field names follow the recorder's `POST /api/documents` contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub sign_now_document_id: String,
    pub workflow: WorkflowMode,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub embedded_sending_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_user_id: Option<String>,
    pub meta: serde_json::Value,
}

impl NotificationPayload {
    /// Payload for the full embed-and-send chain, including file metadata.
    pub fn for_upload(
        document: &DocumentReference,
        workflow: WorkflowMode,
        file: &UploadedFile,
        session: &EmbeddedSession,
        uploader_user_id: Option<String>,
        meta: serde_json::Value,
    ) -> Self {
        Self {
            sign_now_document_id: document.as_str().to_string(),
            workflow,
            uploaded_at: Utc::now(),
            original_name: Some(file.filename.clone()),
            content_type: Some(file.content_type.clone()),
            size_bytes: Some(file.size() as u64),
            embedded_sending_url: session.url.clone(),
            uploader_user_id: normalize_uploader(uploader_user_id),
            meta,
        }
    }

    /// Payload for a session created on an already-uploaded document (no file metadata).
    pub fn for_session(
        document: &DocumentReference,
        workflow: WorkflowMode,
        session: &EmbeddedSession,
        uploader_user_id: Option<String>,
        meta: serde_json::Value,
    ) -> Self {
        Self {
            sign_now_document_id: document.as_str().to_string(),
            workflow,
            uploaded_at: Utc::now(),
            original_name: None,
            content_type: None,
            size_bytes: None,
            embedded_sending_url: session.url.clone(),
            uploader_user_id: normalize_uploader(uploader_user_id),
            meta,
        }
    }
}

fn normalize_uploader(uploader_user_id: Option<String>) -> Option<String> {
    uploader_user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
