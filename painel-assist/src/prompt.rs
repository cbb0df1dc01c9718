//! Request body for the chat-completion endpoint.

use painel_core::Dataset;
use serde::{Deserialize, Serialize};

use crate::client::AssistConfig;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a financial assistant that helps people understand \
their income and spending. Explain clearly, using only the transactions you are given.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Render the whole dataset plus the question as the user turn.
///
/// Records are a JSON array in dataset order; each object keeps the export's
/// column order.
pub fn user_prompt(dataset: &Dataset, question: &str) -> String {
    let records = serde_json::Value::Array(dataset.records());
    format!(
        "You answer questions about a user's financial transactions.\n\
Here are the transactions:\n\
{records}\n\
\n\
User question:\n\
{question}\n\
\n\
Answer clearly and objectively."
    )
}

pub fn build_request(dataset: &Dataset, question: &str, config: &AssistConfig) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(config.system_prompt.clone()),
            ChatMessage::user(user_prompt(dataset, question)),
        ],
        temperature: config.temperature,
    }
}
