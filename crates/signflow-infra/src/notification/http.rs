use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use signflow_core::models::NotificationPayload;
use signflow_core::NotificationConfig;

use super::NotificationSink;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Posts payloads as JSON to the recorder endpoint, authenticated by a shared secret.
#[derive(Clone, Debug)]
pub struct HttpNotificationSink {
    http_client: Client,
    endpoint: String,
    shared_secret: String,
}

impl HttpNotificationSink {
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to create HTTP client for notifications")?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            shared_secret: config.shared_secret.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    #[tracing::instrument(skip(self, payload), fields(document_id = %payload.sign_now_document_id))]
    async fn report(&self, payload: &NotificationPayload) {
        let result = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.shared_secret)
            .json(payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(status = %response.status(), "Notification delivered");
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(
                    status = status.as_u16(),
                    body = %body,
                    "Notification rejected by recorder"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Notification delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::Matcher;
    use serde_json::json;
    use signflow_core::models::{DocumentReference, EmbeddedSession, UploadedFile, WorkflowMode};

    fn payload() -> NotificationPayload {
        let file = UploadedFile::new(
            Bytes::from_static(b"0123456789"),
            Some("contract.pdf".to_string()),
            Some("application/pdf".to_string()),
        );
        NotificationPayload::for_upload(
            &DocumentReference::new("doc-1").unwrap(),
            WorkflowMode::Parallel,
            &file,
            &EmbeddedSession {
                url: "https://sign.example/s/doc-1".to_string(),
            },
            None,
            json!({ "traceId": "req-1" }),
        )
    }

    fn sink_for(endpoint: String) -> HttpNotificationSink {
        HttpNotificationSink::new(&NotificationConfig {
            enabled: true,
            endpoint,
            shared_secret: "s3cret".to_string(),
            timeout_seconds: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_posts_payload_with_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/documents")
            .match_header("x-api-key", "s3cret")
            .match_body(Matcher::PartialJson(json!({
                "signNowDocumentId": "doc-1",
                "workflow": "parallel",
                "embeddedSendingUrl": "https://sign.example/s/doc-1",
                "sizeBytes": 10
            })))
            .with_status(201)
            .create_async()
            .await;

        sink_for(format!("{}/api/documents", server.url()))
            .report(&payload())
            .await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/documents")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        sink_for(format!("{}/api/documents", server.url()))
            .report(&payload())
            .await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_recorder_is_absorbed() {
        sink_for("http://127.0.0.1:9/api/documents".to_string())
            .report(&payload())
            .await;
    }
}
