use crate::db::db_utils::{collect_rows, get_ts};
use crate::errors::AppResult;
use crate::models::balance::VacationBalance;
use crate::utils::time::to_db_ts;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_balance(row: &Row) -> rusqlite::Result<VacationBalance> {
    Ok(VacationBalance {
        user_id: row.get("user_id")?,
        total_days: row.get("total_days")?,
        used_days: row.get("used_days")?,
        pending_days: row.get("pending_days")?,
        carried_over_days: row.get("carried_over_days")?,
        last_updated: get_ts(row, "last_updated")?,
    })
}

pub fn load_balance(conn: &Connection, user_id: &str) -> AppResult<Option<VacationBalance>> {
    let b = conn
        .query_row(
            "SELECT user_id, total_days, used_days, pending_days, carried_over_days, last_updated
             FROM user_vacation_balance WHERE user_id = ?1",
            [user_id],
            map_balance,
        )
        .optional()?;
    Ok(b)
}

/// Every balance row with display names, by name.
pub fn load_all_with_names(conn: &Connection) -> AppResult<Vec<(VacationBalance, String)>> {
    let mut stmt = conn.prepare(
        "SELECT b.user_id, b.total_days, b.used_days, b.pending_days,
                b.carried_over_days, b.last_updated, u.username
         FROM user_vacation_balance b
         JOIN users u ON b.user_id = u.id
         ORDER BY u.username ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((map_balance(row)?, row.get::<_, String>("username")?))
    })?;
    Ok(collect_rows(rows)?)
}

/// First grant for a user without a balance row.
pub fn insert_balance(
    conn: &Connection,
    user_id: &str,
    total_days: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO user_vacation_balance (user_id, total_days, last_updated)
         VALUES (?1, ?2, ?3)",
        params![user_id, total_days, to_db_ts(&now)],
    )?;
    Ok(())
}

pub fn update_total(
    conn: &Connection,
    user_id: &str,
    total_days: i64,
    now: DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE user_vacation_balance SET total_days = ?1, last_updated = ?2 WHERE user_id = ?3",
        params![total_days, to_db_ts(&now), user_id],
    )?;
    Ok(n)
}

/// Reserve days for a request awaiting approval.
pub fn add_pending(conn: &Connection, user_id: &str, days: i64, now: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE user_vacation_balance
         SET pending_days = pending_days + ?1, last_updated = ?2
         WHERE user_id = ?3",
        params![days, to_db_ts(&now), user_id],
    )?;
    Ok(())
}

/// Drop a reservation (rejection). Floors at zero after manual edits.
pub fn release_pending(
    conn: &Connection,
    user_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE user_vacation_balance
         SET pending_days = MAX(0, pending_days - ?1), last_updated = ?2
         WHERE user_id = ?3",
        params![days, to_db_ts(&now), user_id],
    )?;
    Ok(())
}

/// Move a reservation to used days (final approval).
pub fn settle_pending(
    conn: &Connection,
    user_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE user_vacation_balance
         SET pending_days = MAX(0, pending_days - ?1),
             used_days = used_days + ?1,
             last_updated = ?2
         WHERE user_id = ?3",
        params![days, to_db_ts(&now), user_id],
    )?;
    Ok(())
}
