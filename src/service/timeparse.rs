use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;

use crate::LOCAL_TZ;

/// Resolves a free-text time expression against a reference instant in the
/// fixed timezone. Handles RFC 3339 timestamps, "today"/"tomorrow" with an
/// optional clock time, weekday names, bare clock times, and "in N
/// minutes/hours/days" phrases. Anything else is a parse failure.
pub fn parse_time(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(absolute) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(absolute.with_timezone(&LOCAL_TZ));
    }

    let lower = trimmed.to_lowercase();

    if let Some(relative) = parse_relative(&lower, now) {
        return Some(relative);
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    let mut anchor: Option<NaiveDate> = None;
    let mut clock: Option<NaiveTime> = None;

    let mut i = 0;
    while i < words.len() {
        let word = words[i].trim_matches(|c: char| c == ',' || c == '.');
        match word {
            "today" | "tonight" => anchor = Some(now.date_naive()),
            "tomorrow" => anchor = Some(now.date_naive() + Duration::days(1)),
            "at" | "on" | "this" | "next" => {}
            _ => {
                if let Some(weekday) = parse_weekday(word) {
                    let next_week = i > 0 && words[i - 1] == "next";
                    anchor = Some(upcoming_weekday(now.date_naive(), weekday, next_week));
                } else {
                    let after_at = i > 0 && words[i - 1] == "at";
                    if let Some((time, used_next_word)) =
                        parse_clock(word, words.get(i + 1).copied(), after_at)
                    {
                        clock = Some(time);
                        if used_next_word {
                            i += 1;
                        }
                    }
                }
            }
        }
        i += 1;
    }

    match (anchor, clock) {
        (Some(date), Some(time)) => local_datetime(date, time),
        // A day word alone keeps the reference's clock time.
        (Some(date), None) => local_datetime(date, now.time()),
        // A bare clock time means the next such local time at or after now.
        (None, Some(time)) => {
            let today = local_datetime(now.date_naive(), time)?;
            if today >= now {
                Some(today)
            } else {
                local_datetime(now.date_naive() + Duration::days(1), time)
            }
        }
        (None, None) => None,
    }
}

fn parse_relative(lower: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let rest = lower.strip_prefix("in ")?;
    let mut parts = rest.split_whitespace();
    let amount: i64 = parts.next()?.parse().ok()?;
    let delta = match parts.next()?.trim_end_matches('s') {
        "minute" | "min" => Duration::minutes(amount),
        "hour" | "hr" => Duration::hours(amount),
        "day" => Duration::days(amount),
        "week" => Duration::weeks(amount),
        _ => return None,
    };
    Some(now + delta)
}

fn parse_weekday(word: &str) -> Option<Weekday> {
    match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// "Saturday" is the next occurrence on or after today; "next Saturday" is
/// the one in the following week, at least 7 days out.
fn upcoming_weekday(today: NaiveDate, target: Weekday, next_week: bool) -> NaiveDate {
    let mut ahead = (target.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    if next_week {
        ahead += 7;
    }
    today + Duration::days(ahead)
}

/// Parses "5pm", "5:30pm", "17:00", and "5 pm" (consuming the next word).
/// Bare numbers only count as a clock time right after "at", so digits
/// elsewhere in a summary don't get mistaken for times.
fn parse_clock(
    word: &str,
    next: Option<&str>,
    allow_bare: bool,
) -> Option<(NaiveTime, bool)> {
    let (body, meridiem, used_next_word) = if let Some(prefix) = word.strip_suffix("am") {
        (prefix, Some(false), false)
    } else if let Some(prefix) = word.strip_suffix("pm") {
        (prefix, Some(true), false)
    } else {
        match next {
            Some("am") => (word, Some(false), true),
            Some("pm") => (word, Some(true), true),
            _ => (word, None, false),
        }
    };

    if body.is_empty() {
        return None;
    }
    if meridiem.is_none() && !body.contains(':') && !allow_bare {
        return None;
    }

    let (hour_part, minute_part) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None => (body, "0"),
    };
    let mut hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;

    match meridiem {
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(true) if hour != 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0).map(|time| (time, used_next_word))
}

fn local_datetime(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    LOCAL_TZ.from_local_datetime(&date.and_time(time)).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<Tz> {
        // A Tuesday.
        LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 11, 30, 0).unwrap()
    }

    #[test]
    fn parses_tomorrow_with_clock_time() {
        let parsed = parse_time("tomorrow at 5pm", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 11, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_split_meridiem_and_minutes() {
        let parsed = parse_time("today at 5:30 pm", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 17, 30, 0).unwrap()
        );
    }

    #[test]
    fn parses_twenty_four_hour_clock() {
        let parsed = parse_time("tomorrow 14:00", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 11, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn bare_clock_time_in_the_past_rolls_to_next_day() {
        let parsed = parse_time("9am", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn bare_clock_time_still_ahead_stays_today() {
        let parsed = parse_time("5pm", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 10, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_relative_offsets() {
        let parsed = parse_time("in 2 hours", reference()).unwrap();
        assert_eq!(parsed, reference() + Duration::hours(2));
    }

    #[test]
    fn weekday_resolves_to_next_occurrence() {
        let parsed = parse_time("friday at 9am", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 13, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn next_weekday_skips_a_week() {
        let parsed = parse_time("next tuesday at 9am", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 17, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let parsed = parse_time("2026-03-12T15:00:00+05:30", reference()).unwrap();
        assert_eq!(
            parsed,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 12, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn noon_and_midnight_meridiems() {
        let noon = parse_time("tomorrow at 12pm", reference()).unwrap();
        assert_eq!(
            noon,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 11, 12, 0, 0).unwrap()
        );
        let midnight = parse_time("tomorrow at 12am", reference()).unwrap();
        assert_eq!(
            midnight,
            LOCAL_TZ.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn vague_phrases_fail_to_parse() {
        assert!(parse_time("sometime next week maybe", reference()).is_none());
        assert!(parse_time("soonish", reference()).is_none());
        assert!(parse_time("", reference()).is_none());
    }

    #[test]
    fn digits_in_plain_words_are_not_times() {
        assert!(parse_time("room 12", reference()).is_none());
    }
}
