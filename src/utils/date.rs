use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a `start_date`/`end_date` pair and reject reversed ranges.
pub fn parse_range(start: &str, end: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let s = parse_date(start).ok_or_else(|| AppError::InvalidDate(start.to_string()))?;
    let e = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.to_string()))?;

    if e < s {
        return Err(AppError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((s, e))
}

/// Midnight UTC at the start of `day`.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// `[first day, first day of next month)` for a calendar month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| AppError::InvalidOption {
        name: "month".into(),
        value: format!("{year}-{month:02}"),
    })?;

    let (ny, nm) = if first.month() == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let next = NaiveDate::from_ymd_opt(ny, nm, 1).ok_or_else(|| AppError::InvalidOption {
        name: "month".into(),
        value: format!("{ny}-{nm:02}"),
    })?;

    Ok((first, next))
}
