use crate::assistant::generator::Assistant;
use crate::assistant::history::ConversationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Assistant,
    /// Process-lifetime conversation histories, keyed by client-supplied id.
    pub conversations: ConversationStore,
}
