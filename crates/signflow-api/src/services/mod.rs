pub mod embed_send;

pub use embed_send::{CallContext, EmbedSendService};
