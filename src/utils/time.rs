//! Time utilities: store timestamps, trailing windows, duration formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Canonical text form for every stored timestamp.
/// Fixed width UTC with milliseconds, so string order equals time order.
pub fn to_db_ts(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_db_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Start of a trailing window of `days` ending at `now`.
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub fn hours_ago(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    now - Duration::hours(hours)
}

/// 5400 → "1h 30min"
pub fn format_duration(secs: i64) -> String {
    let mins = secs.max(0) / 60;
    format!("{}h {}min", mins / 60, mins % 60)
}

pub fn format_clock(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}

pub fn format_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
