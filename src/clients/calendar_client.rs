use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::models::event::CalendarEvent;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

/// Lists events starting from `time_min`, soonest first, with recurring
/// events expanded to single instances by the provider.
pub async fn list_events(
    client: &reqwest::Client,
    token: &str,
    calendar_id: &str,
    time_min: DateTime<Tz>,
    max_results: u32,
) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
    let response = client
        .get(&url)
        .bearer_auth(token)
        .query(&[
            ("timeMin", time_min.to_rfc3339()),
            ("maxResults", max_results.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(%status, body = %text, "event list request failed");
        return Err(format!("Request failed with status {}", status).into());
    }

    let parsed: EventListResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
    Ok(parsed.items)
}

/// Inserts an event and returns it as created by the provider, id and viewer
/// link included.
pub async fn insert_event(
    client: &reqwest::Client,
    token: &str,
    calendar_id: &str,
    event: &CalendarEvent,
) -> Result<CalendarEvent, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
    let response = client
        .post(&url)
        .bearer_auth(token)
        .json(event)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::warn!(%status, body = %text, "event insert request failed");
        return Err(format!("Request failed with status {}", status).into());
    }

    let created: CalendarEvent = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;
    Ok(created)
}
