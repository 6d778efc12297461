use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::models::event::CalendarEvent;
use crate::LOCAL_TZ;

/// A free interval [start, end) between busy events within one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Local midnight-to-midnight bounds for the given date.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Tz>, DateTime<Tz>) {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    let start = LOCAL_TZ
        .from_local_datetime(&midnight)
        .single()
        .unwrap_or_else(|| LOCAL_TZ.from_utc_datetime(&midnight));
    (start, start + Duration::days(1))
}

/// The gap-finding sweep. Keeps events with a precise start inside
/// [day_start, day_end] (all-day events have no precise time and drop out),
/// sorts them, then walks a cursor from the start of the day emitting the
/// gaps. Busy intervals may overlap; the cursor only ever moves forward.
pub fn free_slots(
    day_start: DateTime<Tz>,
    day_end: DateTime<Tz>,
    events: &[CalendarEvent],
) -> Vec<TimeSlot> {
    let mut busy: Vec<(DateTime<Tz>, DateTime<Tz>)> = events
        .iter()
        .filter_map(|event| {
            let start = event.start.precise()?;
            let end = event.end.as_ref()?.precise()?;
            (start >= day_start && start <= day_end).then_some((start, end))
        })
        .collect();
    busy.sort_by(|a, b| a.0.cmp(&b.0));

    let mut slots = Vec::new();
    let mut cursor = day_start;
    for (start, end) in busy {
        if start > cursor {
            slots.push(TimeSlot {
                start: cursor,
                end: start,
            });
        }
        cursor = cursor.max(end);
    }
    if cursor < day_end {
        slots.push(TimeSlot {
            start: cursor,
            end: day_end,
        });
    }
    slots
}

/// Formats slots as local 12-hour ranges, one per line.
pub fn render_slots(day_label: &str, slots: &[TimeSlot]) -> String {
    if slots.is_empty() {
        return format!("❌ No free slots {}.", day_label);
    }
    let lines: Vec<String> = slots
        .iter()
        .map(|slot| {
            format!(
                "{} - {}",
                slot.start.format("%I:%M %p"),
                slot.end.format("%I:%M %p")
            )
        })
        .collect();
    format!("🕒 Free slots {}:\n{}", day_label, lines.join("\n"))
}
