//! Test helpers: router wired against a mockito server standing in for both
//! the signing provider and the recorder service.
//!
//! Run from workspace root: `cargo test -p signflow-api`.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use signflow_api::setup::{routes, services};
use signflow_core::{Config, GatewayConfig};

pub const TOKEN: &str = "tok-123";
pub const RECORDER_PATH: &str = "/api/documents";

pub struct TestApp {
    pub server: TestServer,
    pub provider: mockito::ServerGuard,
}

/// Build the app with the provider and recorder at one mockito server.
pub async fn setup_test_app() -> TestApp {
    let provider = mockito::Server::new_async().await;

    let mut config = Config::default();
    let mut gateway = GatewayConfig::new(provider.url());
    gateway.basic_token = Some("YmFzaWM=".to_string());
    gateway.timeout_seconds = 5;
    config.gateway = gateway;
    config.notification.endpoint = format!("{}{}", provider.url(), RECORDER_PATH);
    config.notification.shared_secret = "test-secret".to_string();
    config.notification.timeout_seconds = 2;

    let state = services::initialize_services(&config).expect("Failed to build services");
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, provider }
}

/// The 10-byte `contract.pdf` used across scenarios.
pub fn contract_form(workflow: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(b"%PDF-1.4\n%".to_vec())
                .file_name("contract.pdf")
                .mime_type("application/pdf"),
        )
        .add_text("workflow", workflow.to_string())
}
