use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::models::chat::ToolCall;
use crate::service::calendar_service::CalendarGateway;
use crate::service::conflict::find_conflict;
use crate::service::slots::{day_bounds, free_slots, render_slots};
use crate::service::timeparse::parse_time;
use crate::LOCAL_TZ;

/// How many upcoming events a tool pulls per snapshot.
pub const UPCOMING_EVENTS_LIMIT: u32 = 20;

/// The closed set of actions the model may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CheckAvailability,
    BookMeeting,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::CheckAvailability, ToolKind::BookMeeting];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::CheckAvailability => "check_availability",
            ToolKind::BookMeeting => "book_meeting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The schema handed to the model so it can shape its call arguments.
    pub fn schema(self) -> Value {
        match self {
            ToolKind::CheckAvailability => json!({
                "type": "function",
                "function": {
                    "name": self.name(),
                    "description": "Returns available time slots for the specified day ('today' or 'tomorrow'). Scans calendar events and finds gaps between meetings.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "day": {
                                "type": "string",
                                "enum": ["today", "tomorrow"],
                                "description": "Which day to scan."
                            }
                        }
                    }
                }
            }),
            ToolKind::BookMeeting => json!({
                "type": "function",
                "function": {
                    "name": self.name(),
                    "description": "Books a meeting in the calendar. Avoids booking over existing events. End time optional (defaults to 1 hour).",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "summary": {
                                "type": "string",
                                "description": "Meeting title."
                            },
                            "start_time": {
                                "type": "string",
                                "description": "Start time, e.g. 'tomorrow at 5pm'."
                            },
                            "end_time": {
                                "type": "string",
                                "description": "Optional end time."
                            },
                            "attendee_email": {
                                "type": "string",
                                "description": "Optional attendee to invite."
                            }
                        },
                        "required": ["summary", "start_time"]
                    }
                }
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckAvailabilityArgs {
    #[serde(default = "default_day")]
    day: String,
}

fn default_day() -> String {
    "today".to_string()
}

#[derive(Debug, Deserialize)]
struct BookMeetingArgs {
    summary: String,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    attendee_email: Option<String>,
}

/// Executes tool calls against the calendar. Every branch comes back as a
/// string (bad tool names and malformed arguments included), so a call can
/// always be answered with a tool message.
pub struct ToolRegistry {
    gateway: Arc<dyn CalendarGateway>,
}

impl ToolRegistry {
    pub fn new(gateway: Arc<dyn CalendarGateway>) -> Self {
        Self { gateway }
    }

    pub fn schemas(&self) -> Vec<Value> {
        ToolKind::ALL.into_iter().map(ToolKind::schema).collect()
    }

    pub async fn dispatch(&self, call: &ToolCall) -> String {
        let Some(kind) = ToolKind::from_name(&call.function.name) else {
            return format!("❌ Unknown tool: {}", call.function.name);
        };
        let result = match kind {
            ToolKind::CheckAvailability => {
                self.check_availability(&call.function.arguments).await
            }
            ToolKind::BookMeeting => self.book_meeting(&call.function.arguments).await,
        };
        result.unwrap_or_else(|err| {
            tracing::warn!(tool = kind.name(), error = %err, "tool call failed");
            err.to_user_message()
        })
    }

    async fn check_availability(&self, raw_args: &str) -> Result<String, ToolError> {
        let args: CheckAvailabilityArgs =
            serde_json::from_str(raw_args).map_err(|e| ToolError::BadArguments(e.to_string()))?;

        let now = Utc::now().with_timezone(&LOCAL_TZ);
        let day_label = if args.day.eq_ignore_ascii_case("tomorrow") {
            "tomorrow"
        } else {
            "today"
        };
        let target_date = if day_label == "tomorrow" {
            (now + Duration::days(1)).date_naive()
        } else {
            now.date_naive()
        };

        let events = self
            .gateway
            .list_upcoming_events(UPCOMING_EVENTS_LIMIT)
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        let (day_start, day_end) = day_bounds(target_date);
        let slots = free_slots(day_start, day_end, &events);
        Ok(render_slots(day_label, &slots))
    }

    async fn book_meeting(&self, raw_args: &str) -> Result<String, ToolError> {
        let args: BookMeetingArgs =
            serde_json::from_str(raw_args).map_err(|e| ToolError::BadArguments(e.to_string()))?;

        let now = Utc::now().with_timezone(&LOCAL_TZ);
        let start = parse_time(&args.start_time, now)
            .ok_or_else(|| ToolError::ParseFailure("start".to_string()))?;
        let end = match args.end_time.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => parse_time(raw, now)
                .ok_or_else(|| ToolError::ParseFailure("end".to_string()))?,
            None => start + Duration::hours(1),
        };

        // Fresh snapshot for the conflict check, not whatever an earlier
        // availability call happened to see.
        let events = self
            .gateway
            .list_upcoming_events(UPCOMING_EVENTS_LIMIT)
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        if let Some(title) = find_conflict(start, end, &events) {
            return Err(ToolError::Conflict(title));
        }

        let attendee = args
            .attendee_email
            .as_deref()
            .filter(|s| !s.trim().is_empty());
        let created = self
            .gateway
            .create_event(&args.summary, start, Some(end), attendee)
            .await
            .ok_or(ToolError::CreationFailed)?;

        let link = created
            .html_link
            .unwrap_or_else(|| "Link unavailable".to_string());
        Ok(format!(
            "✅ Meeting booked!\n📅 [View in Google Calendar]({})",
            link
        ))
    }
}
