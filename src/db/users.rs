use crate::db::db_utils::{collect_rows, get_opt_ts};
use crate::errors::AppResult;
use crate::models::user::User;
use crate::utils::time::to_db_ts;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        last_active: get_opt_ts(row, "last_active")?,
    })
}

/// Insert the user or refresh display name and last activity.
pub fn upsert_user(conn: &Connection, id: &str, username: &str, now: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, username, last_active)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             username = excluded.username,
             last_active = excluded.last_active",
        params![id, username, to_db_ts(&now)],
    )?;
    Ok(())
}

/// Make sure a referenced user exists without counting it as activity:
/// a new row has no `last_active`, an existing one keeps its own.
/// A known `username` replaces the stored one; otherwise the id stands in.
pub fn register_user(conn: &Connection, id: &str, username: Option<&str>) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, username, last_active)
         VALUES (?1, ?2, NULL)
         ON CONFLICT(id) DO UPDATE SET
             username = COALESCE(?3, users.username)",
        params![id, username.unwrap_or(id), username],
    )?;
    Ok(())
}

pub fn load_user(conn: &Connection, id: &str) -> AppResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, last_active FROM users WHERE id = ?1",
            [id],
            map_user,
        )
        .optional()?;
    Ok(user)
}

/// Users seen since `since`, most recent first.
pub fn load_active_since(conn: &Connection, since: DateTime<Utc>) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, last_active FROM users
         WHERE last_active >= ?1
         ORDER BY last_active DESC, username ASC",
    )?;
    let rows = stmt.query_map([to_db_ts(&since)], map_user)?;
    Ok(collect_rows(rows)?)
}

pub fn load_all(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, last_active FROM users ORDER BY username ASC")?;
    let rows = stmt.query_map([], map_user)?;
    Ok(collect_rows(rows)?)
}
