use chrono::{DateTime, Local, TimeDelta, Utc};

const DISPLAY_FORMAT: &str = "%b %d, %Y, %I:%M %p";

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Returns the current time, or one millisecond past `previous` when the clock
/// has not advanced beyond it.
pub fn now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}

/// Short local date/time for display. Missing or unparsable input yields an
/// empty string.
pub fn format_display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return String::new();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => format_timestamp(&parsed.with_timezone(&Utc)),
        Err(_) => String::new(),
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(DISPLAY_FORMAT)
        .to_string()
}
