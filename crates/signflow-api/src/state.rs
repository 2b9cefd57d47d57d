//! Application state and sub-state extractors.

use std::sync::Arc;

use axum::extract::FromRef;
use signflow_core::Config;
use signflow_gateway::SigningGateway;
use tokio_util::sync::CancellationToken;

use crate::services::{CallContext, EmbedSendService};

/// Gateway client and the orchestration built on top of it.
#[derive(Clone)]
pub struct SigningState {
    pub gateway: Arc<dyn SigningGateway>,
    pub embed_send: Arc<EmbedSendService>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub signing: SigningState,
    /// Cancelled on graceful shutdown; every request works under a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Context for one request, tied to server shutdown.
    pub fn call_context(&self, trace_id: Option<String>) -> CallContext {
        CallContext::new(trace_id, self.shutdown.child_token())
    }
}

impl FromRef<Arc<AppState>> for SigningState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.signing.clone()
    }
}
