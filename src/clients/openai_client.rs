use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::chat::ChatMessage;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// One round-trip to the chat-completions endpoint. The reply is either a
/// plain assistant message or one carrying tool-call requests.
pub async fn chat_completion(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    messages: &[ChatMessage],
    tools: &[Value],
) -> Result<ChatMessage, Box<dyn std::error::Error + Send + Sync>> {
    let request = ChatCompletionRequest {
        model,
        messages,
        tools: (!tools.is_empty()).then_some(tools),
        tool_choice: (!tools.is_empty()).then_some("auto"),
        max_tokens: 1500,
        temperature: 0.2,
    };

    let response = client
        .post(CHAT_COMPLETIONS_URL)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        tracing::warn!(%status, body = %text, "chat completion request failed");
        return Err(format!("Request failed with status {}", status).into());
    }

    let parsed: ChatCompletionResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;

    match parsed.choices.into_iter().next() {
        Some(choice) => Ok(choice.message),
        None => Err("No response from model".to_string().into()),
    }
}
