//! Aggregate queries behind the reporting views.

use crate::db::db_utils::collect_rows;
use crate::errors::AppResult;
use crate::models::report::{DayCount, ProductivityRow};
use crate::utils::time::to_db_ts;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};

/// Distinct calendar days with any ledger entry per user in `[from, until)`.
/// Every user appears, with 0 when idle.
pub fn distinct_days_between(
    conn: &Connection,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> AppResult<Vec<DayCount>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username, COUNT(DISTINCT substr(te.timestamp, 1, 10)) AS days
         FROM users u
         LEFT JOIN time_entries te ON u.id = te.user_id
             AND te.timestamp >= ?1 AND te.timestamp < ?2
         GROUP BY u.id, u.username
         ORDER BY days DESC, u.username ASC",
    )?;
    let rows = stmt.query_map(params![to_db_ts(&from), to_db_ts(&until)], |row| {
        Ok(DayCount {
            user_id: row.get(0)?,
            username: row.get(1)?,
            days: row.get(2)?,
        })
    })?;
    Ok(collect_rows(rows)?)
}

pub fn productivity_between(
    conn: &Connection,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> AppResult<Vec<ProductivityRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username,
                COUNT(DISTINCT substr(te.timestamp, 1, 10)) AS work_days,
                COUNT(CASE WHEN te.entry_type = 'pauza_start' THEN 1 END) AS breaks_taken
         FROM users u
         LEFT JOIN time_entries te ON u.id = te.user_id
             AND te.timestamp >= ?1 AND te.timestamp < ?2
         GROUP BY u.id, u.username
         ORDER BY work_days DESC, u.username ASC",
    )?;
    let rows = stmt.query_map(params![to_db_ts(&from), to_db_ts(&until)], |row| {
        Ok(ProductivityRow {
            user_id: row.get(0)?,
            username: row.get(1)?,
            work_days: row.get(2)?,
            breaks_taken: row.get(3)?,
        })
    })?;
    Ok(collect_rows(rows)?)
}

pub fn count_approved_covering(conn: &Connection, day: NaiveDate) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM vacation_requests
         WHERE status = 'admin_approved' AND ?1 BETWEEN start_date AND end_date",
        [day.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )?;
    Ok(n)
}
