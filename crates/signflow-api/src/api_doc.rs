//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use signflow_core::models;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SignFlow API",
        version = "0.1.0",
        description = "E-signature integration layer in front of SignNow: upload a document, place a signature field and open an embedded-sending session in one call."
    ),
    paths(
        handlers::embed_send::embed_send,
        handlers::upload::upload_document,
        handlers::fields::add_signature_field,
        handlers::embedded::create_embedded_sending,
        handlers::documents::list_documents,
        handlers::download::download_document,
        handlers::signing_links::create_signing_link,
        handlers::signnow_auth::password_grant,
    ),
    components(
        schemas(
            models::EmbedSendResult,
            models::SignatureFieldSpec,
            models::WorkflowMode,
            handlers::upload::UploadResponse,
            handlers::signing_links::SigningLinkRequest,
            handlers::signnow_auth::PasswordGrantRequest,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "signing", description = "Upload, signature fields and embedded sending"),
        (name = "documents", description = "Provider document listing and download"),
        (name = "auth", description = "Provider access token exchange"),
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
