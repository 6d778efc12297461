use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::clients::calendar_client;
use crate::models::event::CalendarEvent;
use crate::LOCAL_TZ;

/// The calendar boundary. Listing surfaces transport errors to the caller;
/// creation is fail-soft and collapses every failure to `None` so the tool
/// layer always has a string outcome to report.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    async fn list_upcoming_events(
        &self,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error + Send + Sync>>;

    async fn create_event(
        &self,
        summary: &str,
        start: DateTime<Tz>,
        end: Option<DateTime<Tz>>,
        attendee_email: Option<&str>,
    ) -> Option<CalendarEvent>;
}

pub struct GoogleCalendarService {
    token: String,
    calendar_id: String,
    http: reqwest::Client,
}

impl GoogleCalendarService {
    pub fn new(token: String, calendar_id: String) -> Self {
        Self {
            token,
            calendar_id,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarService {
    async fn list_upcoming_events(
        &self,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error + Send + Sync>> {
        let now = Utc::now().with_timezone(&LOCAL_TZ);
        calendar_client::list_events(&self.http, &self.token, &self.calendar_id, now, max_results)
            .await
    }

    async fn create_event(
        &self,
        summary: &str,
        start: DateTime<Tz>,
        end: Option<DateTime<Tz>>,
        attendee_email: Option<&str>,
    ) -> Option<CalendarEvent> {
        let body = CalendarEvent::request(summary, start, end, attendee_email);
        match calendar_client::insert_event(&self.http, &self.token, &self.calendar_id, &body)
            .await
        {
            Ok(created) => Some(created),
            Err(err) => {
                tracing::error!(error = %err, summary, "Failed to create calendar event");
                None
            }
        }
    }
}
