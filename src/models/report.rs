//! Read-only rows produced by the status, schedule and report views.

use super::{entry_type::EntryType, location::Location};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Someone currently working or on a break.
#[derive(Debug, Clone, Serialize)]
pub struct PresenceRow {
    pub user_id: String,
    pub username: String,
    pub since: DateTime<Utc>,
    pub location: Location,
}

/// An approved or pending leave period.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRow {
    pub request_id: i64,
    pub user_id: String,
    pub username: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub requested_days: i64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub user_id: String,
    pub username: String,
    pub entry_type: EntryType,
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserActivity {
    pub user_id: String,
    pub username: String,
    pub entries: Vec<EntryRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCount {
    pub user_id: String,
    pub username: String,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductivityRow {
    pub user_id: String,
    pub username: String,
    pub work_days: i64,
    pub breaks_taken: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HoursRow {
    pub user_id: String,
    pub username: String,
    pub worked_secs: i64,
    pub break_secs: i64,
    pub shifts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageRow {
    pub user_id: String,
    pub username: String,
    pub total_days: i64,
    pub used_days: i64,
    pub pending_days: i64,
    pub carried_over_days: i64,
    pub available_days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveUserRow {
    pub user_id: String,
    pub username: String,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct TeamCounts {
    pub online: i64,
    pub on_break: i64,
    pub on_vacation: i64,
    pub off_duty: i64,
}
