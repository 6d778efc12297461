use async_trait::async_trait;
use serde_json::Value;

use crate::clients::openai_client;
use crate::models::chat::ChatMessage;

/// The model boundary: full message context plus tool descriptions in, one
/// reply out. The reply either answers in plain text or requests tool calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[Value],
    ) -> Result<ChatMessage, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct OpenAIService {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAIService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIService {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[Value],
    ) -> Result<ChatMessage, Box<dyn std::error::Error + Send + Sync>> {
        openai_client::chat_completion(&self.http, &self.api_key, &self.model, messages, tools)
            .await
    }
}
