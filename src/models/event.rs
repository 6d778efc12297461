use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::LOCAL_TZ;

/// An event boundary as the calendar service sends it: either a precise
/// RFC 3339 `dateTime`, or a bare `date` for all-day events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn at(instant: DateTime<Tz>) -> Self {
        Self {
            date_time: Some(instant.fixed_offset()),
            date: None,
            time_zone: Some(LOCAL_TZ.name().to_string()),
        }
    }

    /// The boundary as a local instant, if it has a precise date-time.
    pub fn precise(&self) -> Option<DateTime<Tz>> {
        self.date_time.map(|dt| dt.with_timezone(&LOCAL_TZ))
    }

    /// The boundary as a local instant, falling back to local midnight for
    /// date-only values.
    pub fn instant(&self) -> Option<DateTime<Tz>> {
        if let Some(dt) = self.date_time {
            return Some(dt.with_timezone(&LOCAL_TZ));
        }
        let date = self.date?;
        LOCAL_TZ
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .earliest()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
}

/// A calendar event snapshot. The provider owns these; we only read them and
/// submit creation requests shaped the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
}

impl CalendarEvent {
    /// The body for an insert request. Fields the provider assigns (id,
    /// viewer link) stay empty.
    pub fn request(
        summary: &str,
        start: DateTime<Tz>,
        end: Option<DateTime<Tz>>,
        attendee_email: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            summary: Some(summary.to_string()),
            start: EventTime::at(start),
            end: end.map(EventTime::at),
            attendees: attendee_email.map(|email| {
                vec![EventAttendee {
                    email: email.to_string(),
                }]
            }),
            html_link: None,
        }
    }

    /// A timed event, as tests and fakes build them.
    pub fn timed(summary: &str, start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self::request(summary, start, Some(end), None)
    }

    /// An all-day event with date-only boundaries.
    pub fn all_day(summary: &str, date: NaiveDate) -> Self {
        Self {
            id: None,
            summary: Some(summary.to_string()),
            start: EventTime {
                date_time: None,
                date: Some(date),
                time_zone: None,
            },
            end: Some(EventTime {
                date_time: None,
                date: date.succ_opt(),
                time_zone: None,
            }),
            attendees: None,
            html_link: None,
        }
    }

    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or("Untitled")
    }
}
