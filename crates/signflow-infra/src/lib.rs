//! SignFlow Infrastructure Library
//!
//! Shared infrastructure used by the HTTP service:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - Notification delivery to the recorder service

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "notification")]
pub mod notification;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};

#[cfg(feature = "notification")]
pub use notification::{HttpNotificationSink, NoOpNotificationSink, NotificationSink};
