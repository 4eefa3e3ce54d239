use std::sync::Arc;

use smartrelay_core::ChatRelay;
use smartrelay_transcript::TranscriptStore;

/// Shared application state accessible from all route handlers.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    /// Same store the relay appends to; read by the query endpoints.
    pub transcripts: Arc<TranscriptStore>,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        let transcripts = Arc::clone(relay.transcripts());
        Self {
            relay: Arc::new(relay),
            transcripts,
        }
    }
}
