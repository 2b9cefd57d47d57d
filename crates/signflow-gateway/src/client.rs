use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use signflow_core::models::{
    Credential, DocumentReference, EmbeddedSession, RawResponse, SignatureFieldSpec, UploadedFile,
    DEFAULT_CONTENT_TYPE,
};
use signflow_core::{GatewayConfig, SessionOptions};

use crate::content_disposition::filename_from_content_disposition;
use crate::contracts::{
    EmbeddedSendingRequest, EmbeddedSendingResponse, FieldsRequest, SigningLinkRequest,
    UploadResponse,
};
use crate::{DownloadedDocument, GatewayError, SigningGateway};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const DOWNLOAD_CONTENT_TYPE: &str = "application/pdf";

/// reqwest-backed SignNow client.
#[derive(Clone, Debug)]
pub struct SignNowClient {
    client: Client,
    api_base: String,
    api_base_v2: String,
    basic_token: Option<String>,
    provider_name: String,
}

impl SignNowClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for signing provider")?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_base_v2: config.api_base_v2(),
            basic_token: config.basic_token.clone(),
            provider_name: config.provider_name.clone(),
        })
    }

    fn document_url(&self, document: &DocumentReference) -> String {
        format!(
            "{}/document/{}",
            self.api_base,
            utf8_percent_encode(document.as_str(), PATH_SEGMENT)
        )
    }

    fn authorized(&self, method: Method, url: &str, credential: &Credential) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(credential.expose())
            .header(ACCEPT, "application/json")
    }

    fn file_part(file: &UploadedFile) -> Part {
        Part::stream_with_length(reqwest::Body::from(file.data.clone()), file.size() as u64)
            .file_name(file.filename.clone())
    }
}

/// Send a request, mapping network failures to `Transport`.
async fn send(request: RequestBuilder) -> Result<Response, GatewayError> {
    request.send().await.map_err(|e| {
        tracing::error!(error = %e, "Signing provider request failed");
        GatewayError::Transport(e.to_string())
    })
}

/// Consume a non-success response into `Rejected`, keeping the body verbatim.
/// A body that cannot be read is a `Transport` failure.
async fn rejection(response: Response) -> GatewayError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => {
            tracing::warn!(status, "Signing provider rejected request");
            GatewayError::Rejected { status, body }
        }
        Err(e) => {
            tracing::error!(status, error = %e, "Failed to read signing provider error body");
            GatewayError::Transport(e.to_string())
        }
    }
}

async fn expect_success(response: Response) -> Result<Response, GatewayError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(rejection(response).await)
    }
}

/// Decode a 2xx body; malformed JSON is a protocol error with `protocol_message`.
async fn decode<T: DeserializeOwned>(
    response: Response,
    protocol_message: &str,
) -> Result<T, GatewayError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(error = %e, "{}", protocol_message);
        GatewayError::Protocol(protocol_message.to_string())
    })
}

async fn passthrough(response: Response) -> Result<RawResponse, GatewayError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(RawResponse { status, body })
}

#[async_trait]
impl SigningGateway for SignNowClient {
    #[tracing::instrument(skip(self, file, credential), fields(filename = %file.filename, size = file.size()))]
    async fn upload(
        &self,
        file: &UploadedFile,
        credential: &Credential,
    ) -> Result<DocumentReference, GatewayError> {
        let part = match Self::file_part(file).mime_str(&file.content_type) {
            Ok(part) => part,
            Err(_) => Self::file_part(file).mime_str(DEFAULT_CONTENT_TYPE)?,
        };
        let form = Form::new().part("file", part);

        let url = format!("{}/document", self.api_base);
        let response = send(self.authorized(Method::POST, &url, credential).multipart(form)).await?;
        let response = expect_success(response).await?;

        const NO_ID: &str = "Upload succeeded but no document id returned.";
        let body: UploadResponse = decode(response, NO_ID).await?;
        let document = body
            .id
            .and_then(DocumentReference::new)
            .ok_or_else(|| {
                tracing::error!("{}", NO_ID);
                GatewayError::Protocol(NO_ID.to_string())
            })?;

        tracing::info!(document_id = %document, "Document uploaded");
        Ok(document)
    }

    #[tracing::instrument(skip(self, credential, spec), fields(document_id = %document))]
    async fn add_signature_field(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        spec: &SignatureFieldSpec,
    ) -> Result<(), GatewayError> {
        let url = self.document_url(document);
        let request = self
            .authorized(Method::PUT, &url, credential)
            .json(&FieldsRequest::from(spec));
        expect_success(send(request).await?).await?;

        tracing::debug!(page = spec.page_number, role = %spec.role, "Signature field added");
        Ok(())
    }

    #[tracing::instrument(skip(self, credential, options), fields(document_id = %document))]
    async fn create_embedded_session(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        options: &SessionOptions,
    ) -> Result<EmbeddedSession, GatewayError> {
        let url = format!(
            "{}/documents/{}/embedded-sending",
            self.api_base_v2,
            utf8_percent_encode(document.as_str(), PATH_SEGMENT)
        );
        let request = self
            .authorized(Method::POST, &url, credential)
            .json(&EmbeddedSendingRequest {
                kind: "document",
                redirect_uri: &options.redirect_uri,
                link_expiration: options.link_expiration_minutes,
            });
        let response = expect_success(send(request).await?).await?;

        const NO_URL: &str = "Embedded-sending response did not contain a URL.";
        let body: EmbeddedSendingResponse = decode(response, NO_URL).await?;
        let url = body.into_url().ok_or_else(|| {
            tracing::error!("{}", NO_URL);
            GatewayError::Protocol(NO_URL.to_string())
        })?;

        Ok(EmbeddedSession { url })
    }

    async fn list_documents(&self, credential: &Credential) -> Result<RawResponse, GatewayError> {
        let url = format!("{}/document", self.api_base);
        let response = send(self.authorized(Method::GET, &url, credential)).await?;
        passthrough(response).await
    }

    #[tracing::instrument(skip(self, credential), fields(document_id = %document))]
    async fn download(
        &self,
        document: &DocumentReference,
        credential: &Credential,
    ) -> Result<DownloadedDocument, GatewayError> {
        let url = format!("{}/download", self.document_url(document));
        let request = self
            .client
            .get(&url)
            .bearer_auth(credential.expose());
        let response = expect_success(send(request).await?).await?;

        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DOWNLOAD_CONTENT_TYPE)
            .to_string();
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| format!("{}_{}.pdf", self.provider_name, document));

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(GatewayError::from))
            .boxed();

        Ok(DownloadedDocument {
            stream,
            content_type,
            filename,
        })
    }

    #[tracing::instrument(skip(self, credential, redirect_uri), fields(document_id = %document))]
    async fn create_signing_link(
        &self,
        document: &DocumentReference,
        credential: &Credential,
        redirect_uri: Option<&str>,
    ) -> Result<RawResponse, GatewayError> {
        let url = format!("{}/link", self.api_base);
        let request = self
            .authorized(Method::POST, &url, credential)
            .json(&SigningLinkRequest {
                document_id: document.as_str(),
                redirect_uri: redirect_uri.filter(|uri| !uri.trim().is_empty()),
            });
        let response = expect_success(send(request).await?).await?;
        passthrough(response).await
    }

    #[tracing::instrument(skip(self, password))]
    async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RawResponse, GatewayError> {
        let basic_token = self.basic_token.as_deref().ok_or_else(|| {
            tracing::error!("SIGNNOW_BASIC_TOKEN is not configured");
            GatewayError::NotConfigured("SIGNNOW_BASIC_TOKEN is not configured".to_string())
        })?;

        let url = format!("{}/oauth2/token", self.api_base);
        let request = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Basic {}", basic_token))
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
                ("scope", "*"),
            ]);
        let response = expect_success(send(request).await?).await?;
        passthrough(response).await
    }
}
