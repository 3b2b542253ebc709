//! Axum route handler for the chat endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::chat::ConversationTurn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Defaulted so an absent field takes the same 400 path as a blank one.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub chat_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat
///
/// Validates the message, generates a reply against the stored history for
/// `chatId`, then persists both new turns. The store is only written after a
/// successful generation, so a failed upstream call leaves history untouched.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let history = state.conversations.history(&request.chat_id);
    debug!(
        chat_id = %request.chat_id,
        history_len = history.len(),
        "Generating chat reply"
    );

    let reply = state.assistant.generate(&request.message, &history).await?;

    state.conversations.append(
        &request.chat_id,
        [
            ConversationTurn::user(request.message),
            ConversationTurn::assistant(reply.clone()),
        ],
    );

    Ok(Json(ChatResponse { response: reply }))
}
