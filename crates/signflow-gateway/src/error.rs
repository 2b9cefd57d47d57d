use signflow_core::AppError;

/// Classified failure of a single provider call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Provider answered with a non-success status.
    #[error("Signing provider returned {status}")]
    Rejected { status: u16, body: String },

    /// Provider answered 2xx but the payload lacked a required field.
    #[error("{0}")]
    Protocol(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { status, body } => AppError::GatewayRejected { status, body },
            GatewayError::Protocol(msg) => AppError::GatewayProtocol(msg),
            GatewayError::Transport(msg) => AppError::Transport(msg),
            GatewayError::NotConfigured(msg) => AppError::NotConfigured(msg),
        }
    }
}
