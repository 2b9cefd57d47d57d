//! SignFlow Core Library
//!
//! This crate provides the domain models, error types and configuration shared
//! by the gateway client, the infrastructure crate and the HTTP API.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, GatewayConfig, NotificationConfig, SessionOptions};
pub use error::{AppError, ErrorMetadata, LogLevel, CLIENT_CLOSED_REQUEST};
