use crate::db::db_utils::{collect_rows, get_date, get_enum, get_opt_ts, get_ts};
use crate::errors::AppResult;
use crate::models::request::{RequestKind, RequestStatus, VacationRequest};
use crate::utils::time::to_db_ts;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "vr.id, vr.user_id, vr.kind, vr.requested_days, vr.start_date, vr.end_date,
    vr.reason, vr.status, vr.pm_approved_by, vr.pm_approved_at, vr.admin_approved_by,
    vr.admin_approved_at, vr.rejected_by, vr.rejected_at, vr.rejection_reason, vr.created_at";

pub fn map_request(row: &Row) -> rusqlite::Result<VacationRequest> {
    Ok(VacationRequest {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind: get_enum(row, "kind", RequestKind::from_db_str)?,
        requested_days: row.get("requested_days")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_date(row, "end_date")?,
        reason: row.get("reason")?,
        status: get_enum(row, "status", RequestStatus::from_db_str)?,
        pm_approved_by: row.get("pm_approved_by")?,
        pm_approved_at: get_opt_ts(row, "pm_approved_at")?,
        admin_approved_by: row.get("admin_approved_by")?,
        admin_approved_at: get_opt_ts(row, "admin_approved_at")?,
        rejected_by: row.get("rejected_by")?,
        rejected_at: get_opt_ts(row, "rejected_at")?,
        rejection_reason: row.get("rejection_reason")?,
        created_at: get_ts(row, "created_at")?,
    })
}

fn map_with_name(row: &Row) -> rusqlite::Result<(VacationRequest, String)> {
    Ok((map_request(row)?, row.get::<_, String>("username")?))
}

/// Insert a request. Sick leave arrives already approved by its requester.
pub fn insert_request(conn: &Connection, r: &VacationRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO vacation_requests
            (user_id, kind, requested_days, start_date, end_date, reason, status,
             admin_approved_by, admin_approved_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            r.user_id,
            r.kind.to_db_str(),
            r.requested_days,
            r.start_date.format("%Y-%m-%d").to_string(),
            r.end_date.format("%Y-%m-%d").to_string(),
            r.reason,
            r.status.to_db_str(),
            r.admin_approved_by,
            r.admin_approved_at.as_ref().map(to_db_ts),
            to_db_ts(&r.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_request(conn: &Connection, id: i64) -> AppResult<Option<VacationRequest>> {
    let sql = format!("SELECT {COLUMNS} FROM vacation_requests vr WHERE vr.id = ?1");
    let r = conn.query_row(&sql, [id], map_request).optional()?;
    Ok(r)
}

/// Record the PM decision.
pub fn mark_pm_approved(conn: &Connection, id: i64, by: &str, now: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        "UPDATE vacation_requests
         SET status = 'pm_approved', pm_approved_by = ?1, pm_approved_at = ?2
         WHERE id = ?3",
        params![by, to_db_ts(&now), id],
    )?;
    Ok(())
}

pub fn mark_admin_approved(
    conn: &Connection,
    id: i64,
    by: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE vacation_requests
         SET status = 'admin_approved', admin_approved_by = ?1, admin_approved_at = ?2
         WHERE id = ?3",
        params![by, to_db_ts(&now), id],
    )?;
    Ok(())
}

pub fn mark_rejected(
    conn: &Connection,
    id: i64,
    by: &str,
    reason: &str,
    now: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE vacation_requests
         SET status = 'rejected', rejected_by = ?1, rejected_at = ?2, rejection_reason = ?3
         WHERE id = ?4",
        params![by, to_db_ts(&now), reason, id],
    )?;
    Ok(())
}

/// Approval queue: pending requests oldest first.
pub fn load_pending(conn: &Connection) -> AppResult<Vec<(VacationRequest, String)>> {
    let sql = format!(
        "SELECT {COLUMNS}, u.username FROM vacation_requests vr
         JOIN users u ON vr.user_id = u.id
         WHERE vr.status = 'pending'
         ORDER BY vr.created_at ASC, vr.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_with_name)?;
    Ok(collect_rows(rows)?)
}

/// A user's latest requests, newest first.
pub fn load_recent_for_user(
    conn: &Connection,
    user_id: &str,
    limit: i64,
) -> AppResult<Vec<VacationRequest>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM vacation_requests vr
         WHERE vr.user_id = ?1
         ORDER BY vr.created_at DESC, vr.id DESC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, limit], map_request)?;
    Ok(collect_rows(rows)?)
}

/// Approved leave whose date range contains `day`.
pub fn load_approved_covering(
    conn: &Connection,
    day: NaiveDate,
) -> AppResult<Vec<(VacationRequest, String)>> {
    let sql = format!(
        "SELECT {COLUMNS}, u.username FROM vacation_requests vr
         JOIN users u ON vr.user_id = u.id
         WHERE vr.status = 'admin_approved' AND ?1 BETWEEN vr.start_date AND vr.end_date
         ORDER BY vr.start_date ASC, vr.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([day.format("%Y-%m-%d").to_string()], map_with_name)?;
    Ok(collect_rows(rows)?)
}

/// Approved leave starting on or after `day`, soonest first.
pub fn load_approved_upcoming(
    conn: &Connection,
    day: NaiveDate,
    limit: i64,
) -> AppResult<Vec<(VacationRequest, String)>> {
    let sql = format!(
        "SELECT {COLUMNS}, u.username FROM vacation_requests vr
         JOIN users u ON vr.user_id = u.id
         WHERE vr.status = 'admin_approved' AND vr.start_date >= ?1
         ORDER BY vr.start_date ASC, vr.id ASC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![day.format("%Y-%m-%d").to_string(), limit],
        map_with_name,
    )?;
    Ok(collect_rows(rows)?)
}
