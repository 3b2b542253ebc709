//! Response generation: augment the base instructions with the relevance
//! excerpt, then run one completion over the conversation.

use std::sync::Arc;

use crate::assistant::context::extract_relevant_context;
use crate::assistant::prompts::{compose_system_prompt, CONTEXT_SECTION_HEADER};
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, LlmError};
use crate::models::chat::ConversationTurn;
use crate::models::resume::ResumeFacts;

/// The portfolio assistant. Holds the résumé, the base system instructions
/// (composed once at construction), and the injected completion capability.
#[derive(Clone)]
pub struct Assistant {
    resume: Arc<ResumeFacts>,
    base_prompt: Arc<str>,
    completions: Arc<dyn CompletionClient>,
}

impl Assistant {
    pub fn new(resume: Arc<ResumeFacts>, completions: Arc<dyn CompletionClient>) -> Self {
        let base_prompt: Arc<str> = compose_system_prompt(&resume).into();
        Self {
            resume,
            base_prompt,
            completions,
        }
    }

    /// Generates a reply to `message` given the prior `history`.
    ///
    /// Pure with respect to history: persistence of the new turns is the
    /// caller's job. Returns the upstream text verbatim, no post-processing.
    pub async fn generate(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<String, AppError> {
        let excerpt = extract_relevant_context(&self.resume, message);
        let system_prompt = self.augmented_prompt(&excerpt);

        self.completions
            .complete(&system_prompt, history, message)
            .await
            .map_err(|e| match e {
                LlmError::MissingApiKey => AppError::Configuration(e.to_string()),
                other => AppError::Llm(other.to_string()),
            })
    }

    fn augmented_prompt(&self, excerpt: &str) -> String {
        if excerpt.is_empty() {
            self.base_prompt.to_string()
        } else {
            format!("{}{}{}", self.base_prompt, CONTEXT_SECTION_HEADER, excerpt)
        }
    }
}
