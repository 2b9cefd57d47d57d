//! SignFlow gateway client
//!
//! Thin client for the SignNow REST API. Each logical operation is exactly one
//! HTTP request/response cycle; responses are classified uniformly into
//! success values or [`GatewayError`].

mod client;
mod content_disposition;
mod contracts;
mod error;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use signflow_core::models::{
    Credential, DocumentReference, EmbeddedSession, RawResponse, SignatureFieldSpec, UploadedFile,
};
use signflow_core::SessionOptions;

pub use client::SignNowClient;
pub use content_disposition::filename_from_content_disposition;
pub use error::GatewayError;

/// Streamed document body returned by [`SigningGateway::download`].
pub struct DownloadedDocument {
    pub stream: BoxStream<'static, Result<Bytes, GatewayError>>,
    pub content_type: String,
    pub filename: String,
}

impl std::fmt::Debug for DownloadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadedDocument")
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Operations offered by the remote signing provider.
///
/// Every non-2xx answer surfaces as [`GatewayError::Rejected`] carrying the
/// provider's status and raw body.
#[async_trait]
pub trait SigningGateway: Send + Sync {
    /// Upload a file as a new provider document.
    async fn upload(
        &self,
        file: &UploadedFile,
        credential: &Credential,
    ) -> Result<DocumentReference, GatewayError>;

    /// Place one signature field on an existing document.
    async fn add_signature_field(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        spec: &SignatureFieldSpec,
    ) -> Result<(), GatewayError>;

    /// Create an embedded-sending session and return its URL.
    async fn create_embedded_session(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        options: &SessionOptions,
    ) -> Result<EmbeddedSession, GatewayError>;

    /// List the caller's documents. Status and body are passed through as-is.
    async fn list_documents(&self, credential: &Credential) -> Result<RawResponse, GatewayError>;

    async fn download(
        &self,
        document: &DocumentReference,
        credential: &Credential,
    ) -> Result<DownloadedDocument, GatewayError>;

    async fn create_signing_link(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        redirect_uri: Option<&str>,
    ) -> Result<RawResponse, GatewayError>;

    /// Exchange username and password for a provider access token.
    async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RawResponse, GatewayError>;
}
