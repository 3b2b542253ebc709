//! In-memory conversation store.
//!
//! Process-lifetime only: histories are lost on restart and never persisted.
//! The store is an explicitly constructed handle (cloned into state), not a
//! module-level global, so tests get isolated instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::chat::ConversationTurn;

/// Sliding window applied after each append: only the most recent turns are
/// retained, oldest dropped first.
pub const MAX_HISTORY_TURNS: usize = 20;

#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Arc<Mutex<HashMap<String, Vec<ConversationTurn>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the history for `chat_id`, empty for unknown ids.
    /// Never creates an entry; only `append` writes.
    pub fn history(&self, chat_id: &str) -> Vec<ConversationTurn> {
        let conversations = self.lock();
        conversations.get(chat_id).cloned().unwrap_or_default()
    }

    /// Appends `turns` to the conversation, then truncates to the most recent
    /// `MAX_HISTORY_TURNS`. Appends are atomic under the store lock, so
    /// concurrent requests for the same id interleave turns rather than lose
    /// them. Total over any string id.
    pub fn append(&self, chat_id: &str, turns: impl IntoIterator<Item = ConversationTurn>) {
        let mut conversations = self.lock();
        let history = conversations.entry(chat_id.to_string()).or_default();
        history.extend(turns);
        if history.len() > MAX_HISTORY_TURNS {
            let excess = history.len() - MAX_HISTORY_TURNS;
            history.drain(..excess);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<ConversationTurn>>> {
        // Store operations are total; a poisoned lock still holds valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
