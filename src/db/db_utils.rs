//! Row decoding helpers shared by every table module.

use crate::errors::AppError;
use crate::utils::time::parse_db_ts;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Wrap a decoding failure the way rusqlite expects from a row mapper.
pub fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn get_ts(row: &Row, col: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    parse_db_ts(&raw).ok_or_else(|| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

pub fn get_opt_ts(row: &Row, col: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        Some(s) => parse_db_ts(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidDate(s.clone()))),
        None => Ok(None),
    }
}

pub fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

/// Decode a TEXT enum column through its `from_db_str`.
pub fn get_enum<T>(row: &Row, col: &str, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    parse(&raw).ok_or_else(|| {
        conversion_error(
            0,
            AppError::InvalidOption {
                name: col.to_string(),
                value: raw.clone(),
            },
        )
    })
}

/// Collect a `query_map` result, stopping at the first bad row.
pub fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> rusqlite::Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
