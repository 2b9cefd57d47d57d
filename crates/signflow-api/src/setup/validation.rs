//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use signflow_core::config::DEFAULT_WEBHOOK_SECRET;
use signflow_core::Config;

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via CORS_ORIGINS."
        ));
    }

    if config.max_request_body_bytes() == 0 {
        return Err(anyhow::anyhow!("MAX_REQUEST_BODY_MB cannot be 0"));
    }

    if config.gateway.timeout_seconds == 0 {
        return Err(anyhow::anyhow!("SIGNNOW_TIMEOUT_SECS cannot be 0"));
    }

    if !is_http_url(&config.gateway.api_base) {
        return Err(anyhow::anyhow!(
            "SIGNNOW_API_BASE must be an http(s) URL, got '{}'",
            config.gateway.api_base
        ));
    }

    if config.session.link_expiration_minutes == 0 {
        return Err(anyhow::anyhow!(
            "EMBEDDED_LINK_EXPIRATION_MINUTES cannot be 0"
        ));
    }

    if config.notification.enabled {
        if !is_http_url(&config.notification.endpoint) {
            return Err(anyhow::anyhow!(
                "NODE_API_URL must be an http(s) URL, got '{}'",
                config.notification.endpoint
            ));
        }
        if config.notification.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("NOTIFICATION_TIMEOUT_SECS cannot be 0"));
        }
        if is_production && config.notification.shared_secret == DEFAULT_WEBHOOK_SECRET {
            tracing::warn!(
                "DOCUMENTS_WEBHOOK_SECRET uses the default value in production - set a real secret"
            );
        }
    }

    if config.gateway.basic_token.is_none() {
        tracing::warn!("SIGNNOW_BASIC_TOKEN not set - /api/signnow/auth will answer 500");
    }

    Ok(())
}
