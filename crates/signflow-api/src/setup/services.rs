//! Service wiring

use std::sync::Arc;

use anyhow::Result;
use signflow_core::Config;
use signflow_gateway::{SigningGateway, SignNowClient};
use signflow_infra::{HttpNotificationSink, NoOpNotificationSink, NotificationSink};
use tokio_util::sync::CancellationToken;

use crate::services::EmbedSendService;
use crate::state::{AppState, SigningState};

/// Build the gateway client, the notification sink and the orchestration.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let gateway: Arc<dyn SigningGateway> = Arc::new(SignNowClient::new(&config.gateway)?);
    tracing::info!(
        api_base = %config.gateway.api_base,
        timeout_seconds = config.gateway.timeout_seconds,
        password_grant = config.gateway.basic_token.is_some(),
        "Signing gateway client initialized"
    );

    let sink: Arc<dyn NotificationSink> = if config.notification.enabled {
        let sink = HttpNotificationSink::new(&config.notification)?;
        tracing::info!(endpoint = %sink.endpoint(), "Notification sink enabled");
        Arc::new(sink)
    } else {
        tracing::info!("Notification sink disabled");
        Arc::new(NoOpNotificationSink)
    };

    let embed_send = Arc::new(EmbedSendService::new(
        gateway.clone(),
        sink,
        config.session.clone(),
    ));

    Ok(Arc::new(AppState {
        config: config.clone(),
        signing: SigningState {
            gateway,
            embed_send,
        },
        shutdown: CancellationToken::new(),
    }))
}
