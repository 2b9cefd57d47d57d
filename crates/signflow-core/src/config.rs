//! Configuration module
//!
//! Configuration is read from the process environment exactly once, at startup,
//! and then injected into each component. Components never consult the
//! environment themselves.

use std::env;

// Common constants
const SERVER_PORT: u16 = 5080;
const MAX_REQUEST_BODY_MB: usize = 100;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const SIGNNOW_API_BASE: &str = "https://api.signnow.com";
const SIGNNOW_TIMEOUT_SECS: u64 = 60;
const EMBEDDED_REDIRECT_URI: &str = "https://www.signnow.com";
const EMBEDDED_LINK_EXPIRATION_MINUTES: u32 = 45;
const NODE_API_URL: &str = "http://localhost:5000/api/documents";
/// Matches the fallback secret of the recorder service.
pub const DEFAULT_WEBHOOK_SECRET: &str = "supersecret123";
const NOTIFICATION_TIMEOUT_SECS: u64 = 10;

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_request_body_bytes: usize,
    pub http_concurrency_limit: usize,
    /// `LOG_FORMAT=json` switches log output to JSON lines.
    pub log_json: bool,
}

/// Signing provider (SignNow) client settings
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Base URL without trailing slash; v2 endpoints live under `{api_base}/v2`.
    pub api_base: String,
    /// Basic token used for the password grant. Optional: only that route needs it.
    pub basic_token: Option<String>,
    pub timeout_seconds: u64,
    /// Provider name used when generating fallback download filenames.
    pub provider_name: String,
}

impl GatewayConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            basic_token: None,
            timeout_seconds: SIGNNOW_TIMEOUT_SECS,
            provider_name: "signnow".to_string(),
        }
    }

    pub fn api_base_v2(&self) -> String {
        format!("{}/v2", self.api_base)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(SIGNNOW_API_BASE)
    }
}

/// Embedded-sending session parameters sent with every session request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub redirect_uri: String,
    pub link_expiration_minutes: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            redirect_uri: EMBEDDED_REDIRECT_URI.to_string(),
            link_expiration_minutes: EMBEDDED_LINK_EXPIRATION_MINUTES,
        }
    }
}

/// Recorder (notification sink) settings
#[derive(Clone, Debug)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub shared_secret: String,
    pub timeout_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: NODE_API_URL.to_string(),
            shared_secret: DEFAULT_WEBHOOK_SECRET.to_string(),
            timeout_seconds: NOTIFICATION_TIMEOUT_SECS,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub gateway: GatewayConfig,
    pub session: SessionOptions,
    pub notification: NotificationConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str =
            env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_mb = env::var("MAX_REQUEST_BODY_MB")
            .unwrap_or_else(|_| MAX_REQUEST_BODY_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_REQUEST_BODY_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_json: env::var("LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let mut gateway = GatewayConfig::new(
            env::var("SIGNNOW_API_BASE").unwrap_or_else(|_| SIGNNOW_API_BASE.to_string()),
        );
        gateway.basic_token = env::var("SIGNNOW_BASIC_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());
        gateway.timeout_seconds = env::var("SIGNNOW_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SIGNNOW_TIMEOUT_SECS);

        let session = SessionOptions {
            redirect_uri: env::var("EMBEDDED_REDIRECT_URI")
                .unwrap_or_else(|_| EMBEDDED_REDIRECT_URI.to_string()),
            link_expiration_minutes: env::var("EMBEDDED_LINK_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(EMBEDDED_LINK_EXPIRATION_MINUTES),
        };

        let notification = NotificationConfig {
            enabled: env::var("NOTIFICATION_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            endpoint: env::var("NODE_API_URL").unwrap_or_else(|_| NODE_API_URL.to_string()),
            shared_secret: env::var("DOCUMENTS_WEBHOOK_SECRET")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_SECRET.to_string()),
            timeout_seconds: env::var("NOTIFICATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(NOTIFICATION_TIMEOUT_SECS),
        };

        Ok(Config {
            base,
            gateway,
            session,
            notification,
        })
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.base.max_request_body_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["http://localhost:3000".to_string()],
                environment: "development".to_string(),
                max_request_body_bytes: MAX_REQUEST_BODY_MB * 1024 * 1024,
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                log_json: false,
            },
            gateway: GatewayConfig::default(),
            session: SessionOptions::default(),
            notification: NotificationConfig::default(),
        }
    }
}
