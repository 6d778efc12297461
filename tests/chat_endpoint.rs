use std::sync::Arc;

use async_trait::async_trait;
use calendarBot::models::chat::{ChatMessage, ChatRole};
use calendarBot::models::event::CalendarEvent;
use calendarBot::runtime::{chat_reply, ChatRequest, ChatResponse};
use calendarBot::service::calendar_service::CalendarGateway;
use calendarBot::service::openai_service::LlmClient;
use calendarBot::service::orchestrator::Orchestrator;
use calendarBot::service::session::ChatSession;
use calendarBot::service::tools::ToolRegistry;
use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::Value;

struct CannedLlm {
    answer: String,
}

#[async_trait]
impl LlmClient for CannedLlm {
    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _tools: &[Value],
    ) -> Result<ChatMessage, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ChatMessage::assistant(self.answer.clone()))
    }
}

struct EmptyCalendar;

#[async_trait]
impl CalendarGateway for EmptyCalendar {
    async fn list_upcoming_events(
        &self,
        _max_results: u32,
    ) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Vec::new())
    }

    async fn create_event(
        &self,
        summary: &str,
        start: DateTime<Tz>,
        end: Option<DateTime<Tz>>,
        attendee_email: Option<&str>,
    ) -> Option<CalendarEvent> {
        Some(CalendarEvent::request(summary, start, end, attendee_email))
    }
}

#[tokio::test]
async fn chat_round_trip_appends_both_sides_of_the_exchange() {
    let orchestrator = Orchestrator::new(
        Arc::new(CannedLlm {
            answer: "You are free after 3pm.".to_string(),
        }),
        ToolRegistry::new(Arc::new(EmptyCalendar)),
    );
    let session = ChatSession::new();

    let request: ChatRequest =
        serde_json::from_str(r#"{"message":"when am I free?"}"#).unwrap();
    let reply = chat_reply(&orchestrator, &session, request).await;

    assert_eq!(reply.response, "You are free after 3pm.");
    let history = session.snapshot().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content.as_deref(), Some("when am I free?"));
    assert_eq!(history[1].role, ChatRole::Assistant);
}

#[test]
fn response_serializes_to_the_wire_shape() {
    let body = serde_json::to_value(ChatResponse {
        response: "done".to_string(),
    })
    .unwrap();
    assert_eq!(body, serde_json::json!({"response": "done"}));
}

#[test]
fn request_with_missing_message_is_rejected() {
    assert!(serde_json::from_str::<ChatRequest>("{}").is_err());
}
