use std::sync::Arc;

use crate::models::chat::ChatMessage;
use crate::service::openai_service::LlmClient;
use crate::service::session::ChatSession;
use crate::service::tools::ToolRegistry;

/// Upper bound on Thinking/Acting cycles per user message. Keeps a model
/// that never stops asking for tools from looping forever.
pub const MAX_TOOL_CYCLES: usize = 5;

const SYSTEM_INSTRUCTION: &str = "\
You are an AI calendar assistant that helps users schedule meetings using Google Calendar.\n\
\n\
Behavior:\n\
- If user says \"book demo meeting tomorrow at 5pm\", extract:\n\
  - summary: 'demo meeting'\n\
  - start_time: 'tomorrow at 5pm'\n\
- Do NOT ask again if summary or time is already given.\n\
- Book without end time if not given (default to 1hr).\n\
- Include calendar link in final response if event is booked.\n\
- If the user asks for \"link\", return the latest calendar link.\n\
\n\
Instructions:\n\
- Do not make up times.\n\
- Use tools if time or summary is mentioned.";

/// Drives one conversation turn as a two-state loop: Thinking invokes the
/// model with the system instruction plus the whole history; when the reply
/// requests a tool call, Acting executes it and appends the string result as
/// a tool message, then it is the model's turn again. A reply with no tool
/// call is the final answer.
pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { llm, tools }
    }

    /// Runs a turn to completion. This is the recovery boundary: whatever
    /// fails inside comes back as an error chat message, never a fault.
    pub async fn handle_message(&self, session: &ChatSession, text: &str) -> String {
        match self.run_turn(session, text).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::error!(session = session.id(), error = %err, "chat turn failed");
                "⚠️ Something went wrong while handling that request. Please try again."
                    .to_string()
            }
        }
    }

    async fn run_turn(
        &self,
        session: &ChatSession,
        text: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        // Held for the whole turn so concurrent requests against the same
        // session cannot interleave history writes.
        let mut history = session.lock().await;
        history.push(ChatMessage::user(text));

        let schemas = self.tools.schemas();
        for cycle in 0..MAX_TOOL_CYCLES {
            let mut context = Vec::with_capacity(history.len() + 1);
            context.push(ChatMessage::system(SYSTEM_INSTRUCTION));
            context.extend(history.iter().cloned());

            let mut reply = self.llm.chat(&context, &schemas).await?;

            let Some(call) = reply.first_tool_call().cloned() else {
                let answer = reply.content.clone().unwrap_or_default();
                history.push(reply);
                return Ok(answer);
            };

            // Only the first requested call is honored; trim the rest so the
            // stored history pairs one call with the one result below.
            reply.tool_calls = Some(vec![call.clone()]);
            history.push(reply);

            tracing::info!(
                session = session.id(),
                cycle,
                tool = %call.function.name,
                "executing tool call"
            );
            let result = self.tools.dispatch(&call).await;
            history.push(ChatMessage::tool_result(&call.id, result));
        }

        let bailout =
            "⚠️ I couldn't finish that request within the allowed number of tool calls."
                .to_string();
        history.push(ChatMessage::assistant(bailout.clone()));
        Ok(bailout)
    }
}
