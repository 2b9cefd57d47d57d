//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use signflow_core::Config;
use signflow_infra::request_id_middleware;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit(),
        max_request_body_bytes = config.max_request_body_bytes(),
        "HTTP limits configured"
    );

    let app = public_routes()
        .merge(signing_routes(state))
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes()))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(RequestBodyLimitLayer::new(config.max_request_body_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no credential required)
fn public_routes() -> Router<()> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Signing routes. The bearer credential is extracted per handler; the two
/// token-exchange routes take their secrets in the body instead.
fn signing_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(
            "/api/documents/embed-send",
            post(handlers::embed_send::embed_send),
        )
        .route("/api/upload", post(handlers::upload::upload_document))
        .route(
            "/api/documents/{documentId}/fields/signature",
            put(handlers::fields::add_signature_field),
        )
        .route(
            "/api/documents/{documentId}/embedded-sending",
            post(handlers::embedded::create_embedded_sending),
        )
        .route(
            "/api/document/list-documents",
            get(handlers::documents::list_documents),
        )
        .route(
            "/api/download/{documentId}",
            get(handlers::download::download_document),
        )
        .route(
            "/api/signing-links",
            post(handlers::signing_links::create_signing_link),
        )
        .route(
            "/api/signnow/auth",
            post(handlers::signnow_auth::password_grant),
        )
        .with_state(state)
}
