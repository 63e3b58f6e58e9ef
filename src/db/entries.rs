use crate::db::db_utils::{collect_rows, get_enum, get_ts};
use crate::errors::AppResult;
use crate::models::entry_type::EntryType;
use crate::models::location::Location;
use crate::models::time_entry::TimeEntry;
use crate::utils::time::to_db_ts;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

const COLUMNS: &str = "te.id, te.user_id, te.entry_type, te.timestamp, te.location, te.notes";

pub fn map_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        entry_type: get_enum(row, "entry_type", EntryType::from_db_str)?,
        timestamp: get_ts(row, "timestamp")?,
        location: get_enum(row, "location", Location::from_db_str)?,
        notes: row.get("notes")?,
    })
}

/// Append one ledger entry; returns its id. There is no update or delete.
pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO time_entries (user_id, entry_type, timestamp, location, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        e.user_id,
        e.entry_type.to_db_str(),
        to_db_ts(&e.timestamp),
        e.location.to_db_str(),
        e.notes,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// A user's entries at or after `since`, newest first.
pub fn load_for_user_since(
    conn: &Connection,
    user_id: &str,
    since: DateTime<Utc>,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM time_entries te
         WHERE te.user_id = ?1 AND te.timestamp >= ?2
         ORDER BY te.timestamp DESC, te.id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, to_db_ts(&since)], map_entry)?;
    Ok(collect_rows(rows)?)
}

/// Everyone's entries in `[from, until)` with display names, oldest first.
pub fn load_between(
    conn: &Connection,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> AppResult<Vec<(TimeEntry, String)>> {
    let sql = format!(
        "SELECT {COLUMNS}, u.username FROM time_entries te
         JOIN users u ON te.user_id = u.id
         WHERE te.timestamp >= ?1 AND te.timestamp < ?2
         ORDER BY te.timestamp ASC, te.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![to_db_ts(&from), to_db_ts(&until)], |row| {
        Ok((map_entry(row)?, row.get::<_, String>("username")?))
    })?;
    Ok(collect_rows(rows)?)
}

/// off / off_sick entries since `since`, newest first.
pub fn load_off_since(
    conn: &Connection,
    since: DateTime<Utc>,
    limit: i64,
) -> AppResult<Vec<(TimeEntry, String)>> {
    let sql = format!(
        "SELECT {COLUMNS}, u.username FROM time_entries te
         JOIN users u ON te.user_id = u.id
         WHERE te.entry_type IN ('off', 'off_sick') AND te.timestamp >= ?1
         ORDER BY te.timestamp DESC, te.id DESC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![to_db_ts(&since), limit], |row| {
        Ok((map_entry(row)?, row.get::<_, String>("username")?))
    })?;
    Ok(collect_rows(rows)?)
}

pub fn count_off_since(conn: &Connection, since: DateTime<Utc>) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM time_entries
         WHERE entry_type IN ('off', 'off_sick') AND timestamp >= ?1",
        [to_db_ts(&since)],
        |row| row.get(0),
    )?;
    Ok(n)
}
