use bytes::Bytes;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Content type used when the caller did not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from the caller, consumed once by the upload step.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl UploadedFile {
    /// Build an uploaded file, defaulting a missing filename to `unknown` and a
    /// blank content type to [`DEFAULT_CONTENT_TYPE`].
    pub fn new(data: Bytes, filename: Option<String>, content_type: Option<String>) -> Self {
        let filename = filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Self {
            data,
            filename,
            content_type,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Provider-assigned document identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference(String);

impl DocumentReference {
    /// Returns `None` for blank identifiers.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DocumentReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Provider response forwarded to the caller without reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}
