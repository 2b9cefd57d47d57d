//! SignFlow API Library
//!
//! HTTP handlers, orchestration services and application setup.

mod api_doc;
mod handlers;
mod utils;

pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use api_doc::get_openapi_spec;
pub use error::{ErrorResponse, HttpAppError};
pub use services::{CallContext, EmbedSendService};
pub use state::{AppState, SigningState};
