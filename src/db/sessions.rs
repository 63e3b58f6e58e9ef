use crate::db::db_utils::{collect_rows, get_enum, get_ts};
use crate::errors::AppResult;
use crate::models::location::Location;
use crate::models::session::{ActiveSession, SessionType};
use crate::utils::time::to_db_ts;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_session(row: &Row) -> rusqlite::Result<ActiveSession> {
    Ok(ActiveSession {
        user_id: row.get("user_id")?,
        session_type: get_enum(row, "session_type", SessionType::from_db_str)?,
        start_time: get_ts(row, "start_time")?,
        location: get_enum(row, "location", Location::from_db_str)?,
    })
}

pub fn load_session(conn: &Connection, user_id: &str) -> AppResult<Option<ActiveSession>> {
    let s = conn
        .query_row(
            "SELECT user_id, session_type, start_time, location
             FROM active_sessions WHERE user_id = ?1",
            [user_id],
            map_session,
        )
        .optional()?;
    Ok(s)
}

/// Plain INSERT: the `user_id` primary key rejects a second open session
/// instead of silently replacing it.
pub fn insert_session(conn: &Connection, s: &ActiveSession) -> AppResult<()> {
    conn.execute(
        "INSERT INTO active_sessions (user_id, session_type, start_time, location)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            s.user_id,
            s.session_type.to_db_str(),
            to_db_ts(&s.start_time),
            s.location.to_db_str(),
        ],
    )?;
    Ok(())
}

/// Remove the user's session of the given type, returning what was removed.
pub fn delete_session(
    conn: &Connection,
    user_id: &str,
    session_type: SessionType,
) -> AppResult<Option<ActiveSession>> {
    let s = conn
        .query_row(
            "DELETE FROM active_sessions
             WHERE user_id = ?1 AND session_type = ?2
             RETURNING user_id, session_type, start_time, location",
            params![user_id, session_type.to_db_str()],
            map_session,
        )
        .optional()?;
    Ok(s)
}

/// Open sessions of one type joined with display names, oldest first.
pub fn load_by_type(
    conn: &Connection,
    session_type: SessionType,
) -> AppResult<Vec<(ActiveSession, String)>> {
    let mut stmt = conn.prepare(
        "SELECT sa.user_id, sa.session_type, sa.start_time, sa.location, u.username
         FROM active_sessions sa
         JOIN users u ON sa.user_id = u.id
         WHERE sa.session_type = ?1
         ORDER BY sa.start_time ASC",
    )?;
    let rows = stmt.query_map([session_type.to_db_str()], |row| {
        Ok((map_session(row)?, row.get::<_, String>("username")?))
    })?;
    Ok(collect_rows(rows)?)
}

pub fn count_by_type(conn: &Connection, session_type: SessionType) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM active_sessions WHERE session_type = ?1",
        [session_type.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(n)
}
