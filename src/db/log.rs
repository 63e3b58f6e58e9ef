use crate::db::db_utils::{collect_rows, get_ts};
use crate::errors::AppResult;
use crate::models::audit::AuditEntry;
use crate::utils::time::to_db_ts;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

/// Write an internal log line into the `audit_log` table.
pub fn audit(
    conn: &Connection,
    user_id: &str,
    action: &str,
    target: &str,
    details: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (created_at, user_id, action, target, details)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![to_db_ts(&now), user_id, action, target, details])?;

    Ok(())
}

fn map_audit(row: &Row) -> rusqlite::Result<AuditEntry> {
    Ok(AuditEntry {
        id: row.get("id")?,
        created_at: get_ts(row, "created_at")?,
        user_id: row.get("user_id")?,
        action: row.get("action")?,
        target: row.get("target")?,
        details: row.get("details")?,
    })
}

pub fn load_audit(conn: &Connection) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, created_at, user_id, action, target, details
         FROM audit_log ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_audit)?;
    Ok(collect_rows(rows)?)
}

pub fn load_audit_by_action(conn: &Connection, action: &str) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, created_at, user_id, action, target, details
         FROM audit_log WHERE action = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([action], map_audit)?;
    Ok(collect_rows(rows)?)
}
