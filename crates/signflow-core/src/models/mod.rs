//! Domain models shared by the gateway client, the orchestration service and the HTTP layer.
//!
//! Everything here is request-scoped: nothing is persisted.

pub mod credential;
pub mod document;
pub mod field;
pub mod notification;
pub mod session;
pub mod workflow;

pub use credential::Credential;
pub use document::{DocumentReference, RawResponse, UploadedFile, DEFAULT_CONTENT_TYPE};
pub use field::{SignatureFieldOverrides, SignatureFieldSpec};
pub use notification::NotificationPayload;
pub use session::{EmbedSendResult, EmbeddedSession};
pub use workflow::WorkflowMode;
