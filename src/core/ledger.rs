use crate::db::entries::{insert_entry, load_for_user_since};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::time_entry::TimeEntry;
use crate::utils::time::days_ago;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Write-once, read-many log of session transitions.
pub struct LedgerLogic;

impl LedgerLogic {
    pub fn append(conn: &Connection, entry: &TimeEntry) -> AppResult<i64> {
        insert_entry(conn, entry)
    }

    /// Entries of one user within the trailing `since_days`, newest first.
    pub fn history(
        pool: &mut DbPool,
        user_id: &str,
        since_days: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<TimeEntry>> {
        load_for_user_since(&pool.conn, user_id, days_ago(now, since_days))
    }
}
