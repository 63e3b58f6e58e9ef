//! Read-only status, schedule and report views.

use crate::db::balance::load_all_with_names;
use crate::db::entries::{count_off_since, load_between, load_off_since};
use crate::db::pool::DbPool;
use crate::db::requests::{load_approved_covering, load_approved_upcoming, load_pending};
use crate::db::sessions::{count_by_type, load_by_type};
use crate::db::stats::{count_approved_covering, distinct_days_between, productivity_between};
use crate::db::users::{load_active_since, load_all};
use crate::errors::AppResult;
use crate::models::entry_type::EntryType;
use crate::models::report::{
    ActiveUserRow, DayCount, EntryRow, HoursRow, LeaveRow, PresenceRow, ProductivityRow, TeamCounts,
    UsageRow, UserActivity,
};
use crate::models::request::VacationRequest;
use crate::models::session::{ActiveSession, SessionType};
use crate::models::time_entry::TimeEntry;
use crate::utils::date::{day_start, month_bounds, today};
use crate::utils::time::{days_ago, hours_ago};
use chrono::{DateTime, Datelike, Duration, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

const OFF_DUTY_LIMIT: i64 = 10;
const CALENDAR_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusKind {
    Online,
    OnBreak,
    OnVacation,
    OffDuty,
    TeamOverview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleKind {
    Today,
    Week,
    VacationCalendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    TimeToday,
    VacationPending,
    UserActivity,
    VacationUsage,
    WorkHours,
    MonthlyAttendance,
    Productivity,
}

/// Optional report parameters; unset fields take per-report defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportParams {
    pub days: Option<i64>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum StatusView {
    Online { rows: Vec<PresenceRow> },
    OnBreak { rows: Vec<PresenceRow> },
    OnVacation { rows: Vec<LeaveRow> },
    OffDuty { window_hours: i64, rows: Vec<EntryRow> },
    TeamOverview { counts: TeamCounts },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ScheduleView {
    Today { users: Vec<UserActivity> },
    Week { rows: Vec<DayCount> },
    VacationCalendar { rows: Vec<LeaveRow> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ReportView {
    TimeToday { entries: Vec<EntryRow> },
    VacationPending { requests: Vec<LeaveRow> },
    UserActivity { days: i64, users: Vec<ActiveUserRow> },
    VacationUsage { rows: Vec<UsageRow> },
    WorkHours { days: i64, rows: Vec<HoursRow> },
    MonthlyAttendance { year: i32, month: u32, rows: Vec<DayCount> },
    Productivity { days: i64, rows: Vec<ProductivityRow> },
}

fn presence((s, username): (ActiveSession, String)) -> PresenceRow {
    PresenceRow {
        user_id: s.user_id,
        username,
        since: s.start_time,
        location: s.location,
    }
}

fn leave((r, username): (VacationRequest, String)) -> LeaveRow {
    LeaveRow {
        request_id: r.id,
        user_id: r.user_id,
        username,
        start_date: r.start_date,
        end_date: r.end_date,
        requested_days: r.requested_days,
        reason: r.reason,
        created_at: r.created_at,
    }
}

fn entry_row((e, username): (TimeEntry, String)) -> EntryRow {
    EntryRow {
        user_id: e.user_id,
        username,
        entry_type: e.entry_type,
        timestamp: e.timestamp,
        location: e.location,
        notes: e.notes,
    }
}

/// Worked and break seconds over a user's ledger entries (oldest first).
///
/// A shift runs from clock_in to clock_out; time between pauza_start and
/// pauza_end inside it is break time. A clock_in while a shift is still
/// open closes the old shift (and any break) at that instant. Shifts still
/// open at the end of the slice are not counted.
pub fn worked_seconds(entries: &[TimeEntry]) -> (i64, i64, i64) {
    let mut worked = 0;
    let mut breaks = 0;
    let mut shifts = 0;

    let mut shift_open: Option<DateTime<Utc>> = None;
    let mut break_open: Option<DateTime<Utc>> = None;
    let mut shift_breaks = 0;

    let mut close = |start: DateTime<Utc>,
                     at: DateTime<Utc>,
                     break_open: &mut Option<DateTime<Utc>>,
                     shift_breaks: &mut i64| {
        if let Some(b) = break_open.take() {
            *shift_breaks += (at - b).num_seconds().max(0);
        }
        let total = (at - start).num_seconds().max(0);
        worked += (total - *shift_breaks).max(0);
        breaks += *shift_breaks;
        shifts += 1;
        *shift_breaks = 0;
    };

    for e in entries {
        match e.entry_type {
            EntryType::ClockIn => {
                if let Some(start) = shift_open.take() {
                    close(start, e.timestamp, &mut break_open, &mut shift_breaks);
                }
                break_open = None;
                shift_breaks = 0;
                shift_open = Some(e.timestamp);
            }
            EntryType::PauzaStart => {
                if shift_open.is_some() && break_open.is_none() {
                    break_open = Some(e.timestamp);
                }
            }
            EntryType::PauzaEnd => {
                if let Some(b) = break_open.take() {
                    shift_breaks += (e.timestamp - b).num_seconds().max(0);
                }
            }
            EntryType::ClockOut => {
                if let Some(start) = shift_open.take() {
                    close(start, e.timestamp, &mut break_open, &mut shift_breaks);
                }
            }
            EntryType::Off | EntryType::OffSick => {}
        }
    }

    (worked, breaks, shifts)
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn status(
        pool: &mut DbPool,
        kind: StatusKind,
        off_window_hours: i64,
        now: DateTime<Utc>,
    ) -> AppResult<StatusView> {
        let conn = &pool.conn;
        debug!(?kind, "status view");

        let view = match kind {
            StatusKind::Online => StatusView::Online {
                rows: load_by_type(conn, SessionType::Work)?
                    .into_iter()
                    .map(presence)
                    .collect(),
            },
            StatusKind::OnBreak => StatusView::OnBreak {
                rows: load_by_type(conn, SessionType::Break)?
                    .into_iter()
                    .map(presence)
                    .collect(),
            },
            StatusKind::OnVacation => StatusView::OnVacation {
                rows: load_approved_covering(conn, today(now))?
                    .into_iter()
                    .map(leave)
                    .collect(),
            },
            StatusKind::OffDuty => StatusView::OffDuty {
                window_hours: off_window_hours,
                rows: load_off_since(conn, hours_ago(now, off_window_hours), OFF_DUTY_LIMIT)?
                    .into_iter()
                    .map(entry_row)
                    .collect(),
            },
            StatusKind::TeamOverview => StatusView::TeamOverview {
                counts: TeamCounts {
                    online: count_by_type(conn, SessionType::Work)?,
                    on_break: count_by_type(conn, SessionType::Break)?,
                    on_vacation: count_approved_covering(conn, today(now))?,
                    off_duty: count_off_since(conn, hours_ago(now, off_window_hours))?,
                },
            },
        };
        Ok(view)
    }

    pub fn schedule(pool: &mut DbPool, kind: ScheduleKind, now: DateTime<Utc>) -> AppResult<ScheduleView> {
        let conn = &pool.conn;
        debug!(?kind, "schedule view");

        let view = match kind {
            ScheduleKind::Today => {
                let start = day_start(today(now));
                let entries = load_between(conn, start, start + Duration::days(1))?;

                // Group by user, first activity of the day decides the order.
                let mut order: Vec<String> = Vec::new();
                let mut groups: BTreeMap<String, UserActivity> = BTreeMap::new();
                for (e, username) in entries {
                    let group = groups.entry(e.user_id.clone()).or_insert_with(|| {
                        order.push(e.user_id.clone());
                        UserActivity {
                            user_id: e.user_id.clone(),
                            username: username.clone(),
                            entries: Vec::new(),
                        }
                    });
                    group.entries.push(entry_row((e, username)));
                }
                let users = order
                    .iter()
                    .filter_map(|id| groups.remove(id))
                    .collect();
                ScheduleView::Today { users }
            }
            ScheduleKind::Week => ScheduleView::Week {
                rows: distinct_days_between(conn, days_ago(now, 7), now + Duration::seconds(1))?,
            },
            ScheduleKind::VacationCalendar => ScheduleView::VacationCalendar {
                rows: load_approved_upcoming(conn, today(now), CALENDAR_LIMIT)?
                    .into_iter()
                    .map(leave)
                    .collect(),
            },
        };
        Ok(view)
    }

    pub fn report(
        pool: &mut DbPool,
        kind: ReportKind,
        params: ReportParams,
        now: DateTime<Utc>,
    ) -> AppResult<ReportView> {
        let conn = &pool.conn;
        debug!(?kind, ?params, "report view");
        let until = now + Duration::seconds(1);

        let view = match kind {
            ReportKind::TimeToday => {
                let start = day_start(today(now));
                let mut entries: Vec<EntryRow> = load_between(conn, start, start + Duration::days(1))?
                    .into_iter()
                    .map(entry_row)
                    .collect();
                entries.reverse();
                ReportView::TimeToday { entries }
            }
            ReportKind::VacationPending => ReportView::VacationPending {
                requests: load_pending(conn)?.into_iter().map(leave).collect(),
            },
            ReportKind::UserActivity => {
                let days = params.days.unwrap_or(7);
                let users = load_active_since(conn, days_ago(now, days))?
                    .into_iter()
                    .filter_map(|u| {
                        let last_active = u.last_active?;
                        Some(ActiveUserRow {
                            user_id: u.id,
                            username: u.username,
                            last_active,
                        })
                    })
                    .collect();
                ReportView::UserActivity { days, users }
            }
            ReportKind::VacationUsage => ReportView::VacationUsage {
                rows: load_all_with_names(conn)?
                    .into_iter()
                    .map(|(b, username)| UsageRow {
                        available_days: b.available_days(),
                        user_id: b.user_id,
                        username,
                        total_days: b.total_days,
                        used_days: b.used_days,
                        pending_days: b.pending_days,
                        carried_over_days: b.carried_over_days,
                    })
                    .collect(),
            },
            ReportKind::WorkHours => {
                let days = params.days.unwrap_or(7);
                let entries = load_between(conn, days_ago(now, days), until)?;

                let mut per_user: BTreeMap<String, (String, Vec<TimeEntry>)> = BTreeMap::new();
                for u in load_all(conn)? {
                    per_user.insert(u.id, (u.username, Vec::new()));
                }
                for (e, username) in entries {
                    per_user
                        .entry(e.user_id.clone())
                        .or_insert_with(|| (username, Vec::new()))
                        .1
                        .push(e);
                }

                let mut rows: Vec<HoursRow> = per_user
                    .into_iter()
                    .map(|(user_id, (username, entries))| {
                        let (worked_secs, break_secs, shifts) = worked_seconds(&entries);
                        HoursRow {
                            user_id,
                            username,
                            worked_secs,
                            break_secs,
                            shifts,
                        }
                    })
                    .collect();
                rows.sort_by(|a, b| {
                    b.worked_secs
                        .cmp(&a.worked_secs)
                        .then_with(|| a.username.cmp(&b.username))
                });
                ReportView::WorkHours { days, rows }
            }
            ReportKind::MonthlyAttendance => {
                let month = params.month.unwrap_or_else(|| now.month());
                let year = params.year.unwrap_or_else(|| now.year());
                let (first, next) = month_bounds(year, month)?;
                ReportView::MonthlyAttendance {
                    year,
                    month,
                    rows: distinct_days_between(conn, day_start(first), day_start(next))?,
                }
            }
            ReportKind::Productivity => {
                let days = params.days.unwrap_or(30);
                ReportView::Productivity {
                    days,
                    rows: productivity_between(conn, days_ago(now, days), until)?,
                }
            }
        };
        Ok(view)
    }
}
