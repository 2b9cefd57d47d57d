//! Best-effort delivery of completed signing operations to the recorder service.
//!
//! The sink contract returns `()`: delivery failures are logged and absorbed
//! here and can never alter a workflow result.

mod http;

use async_trait::async_trait;
use signflow_core::models::NotificationPayload;

pub use http::HttpNotificationSink;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn report(&self, payload: &NotificationPayload);
}

/// Sink used when reporting is disabled.
#[derive(Debug, Default)]
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSink for NoOpNotificationSink {
    async fn report(&self, payload: &NotificationPayload) {
        tracing::debug!(
            document_id = %payload.sign_now_document_id,
            "Notification reporting disabled; skipping"
        );
    }
}
