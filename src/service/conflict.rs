use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::event::CalendarEvent;

/// Checks a proposed [start, end) against existing events under open-interval
/// semantics, so back-to-back bookings are fine. Boundaries prefer precise
/// date-times and fall back to date-only midnights; events with no parseable
/// bound are skipped. Returns the first colliding event's title.
pub fn find_conflict(
    proposed_start: DateTime<Tz>,
    proposed_end: DateTime<Tz>,
    events: &[CalendarEvent],
) -> Option<String> {
    for event in events {
        let Some(existing_start) = event.start.instant() else {
            continue;
        };
        let Some(existing_end) = event.end.as_ref().and_then(|t| t.instant()) else {
            continue;
        };
        if proposed_start < existing_end && proposed_end > existing_start {
            return Some(event.title().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::LOCAL_TZ;

    #[test]
    fn abutting_intervals_do_not_conflict() {
        let event = CalendarEvent::timed(
            "Standup",
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap(),
        );
        let conflict = find_conflict(
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap(),
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 11, 0, 0).unwrap(),
            &[event],
        );
        assert_eq!(conflict, None);
    }

    #[test]
    fn unbounded_events_are_skipped() {
        let mut event = CalendarEvent::timed(
            "Open ended",
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap(),
        );
        event.end = None;
        let conflict = find_conflict(
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap(),
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 9, 45, 0).unwrap(),
            &[event],
        );
        assert_eq!(conflict, None);
    }
}
