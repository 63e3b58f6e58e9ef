//! Text rendering of command outcomes. With `--json` the same values are
//! printed through serde instead.

use crate::core::balance::BalanceAdjusted;
use crate::core::remind::ReminderRecorded;
use crate::core::reports::{ReportView, ScheduleView, StatusView};
use crate::core::tracker::{BreakStarted, ClockedIn, MarkedOff, SessionClosed};
use crate::core::workflow::{RequestCreated, Reviewed};
use crate::errors::{AppError, AppResult};
use crate::models::balance::VacationBalance;
use crate::models::entry_type::EntryType;
use crate::models::report::{DayCount, EntryRow, LeaveRow, PresenceRow};
use crate::models::request::{RequestKind, RequestStatus, VacationRequest};
use crate::models::session::SessionType;
use crate::models::time_entry::TimeEntry;
use crate::utils::colors::{GREY, color_for_available, colorize};
use crate::utils::formatting::{bold, plural};
use crate::utils::table::Table;
use crate::utils::time::{format_clock, format_duration, format_stamp};
use serde::Serialize;

/// Print `value` as pretty JSON, or the text produced by `text`.
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> AppResult<()> {
    if json {
        let out = serde_json::to_string_pretty(value).map_err(AppError::InvalidPayload)?;
        println!("{out}");
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn status_label(s: RequestStatus) -> &'static str {
    match s {
        RequestStatus::Pending => "⏳ pending",
        RequestStatus::PmApproved => "🟡 pm approved",
        RequestStatus::AdminApproved => "✅ approved",
        RequestStatus::Rejected => "❌ rejected",
    }
}

fn entry_label(e: &EntryType) -> &'static str {
    match e {
        EntryType::ClockIn => "🟢 clock in",
        EntryType::ClockOut => "🔴 clock out",
        EntryType::PauzaStart => "☕ break start",
        EntryType::PauzaEnd => "🔙 break end",
        EntryType::Off => "🌙 off",
        EntryType::OffSick => "🤒 sick",
    }
}

pub fn clocked_in(c: &ClockedIn) -> String {
    let mut out = format!("✅ Clocked in at {} ({})\n", format_clock(&c.started_at), c.location.label());
    if c.closed_break {
        out.push_str("   The open break was closed.\n");
    }
    out
}

pub fn session_closed(s: &SessionClosed) -> String {
    match s.session_type {
        SessionType::Work => format!(
            "✅ Clocked out at {}. Session: {}\n",
            format_clock(&s.ended_at),
            format_duration(s.duration_secs),
        ),
        SessionType::Break => format!(
            "✅ Break over after {} ({})\n",
            format_duration(s.duration_secs),
            s.location.label(),
        ),
    }
}

pub fn break_started(b: &BreakStarted) -> String {
    format!("☕ Break started at {}\n", format_clock(&b.started_at))
}

pub fn marked_off(m: &MarkedOff) -> String {
    let mut out = format!("🌙 Marked off at {}\n", format_clock(&m.at));
    if let Some(s) = &m.ended {
        out.push_str(&format!(
            "   Closed {} session after {}\n",
            s.session_type.to_db_str(),
            format_duration(s.duration_secs)
        ));
    }
    out
}

pub fn request_created(r: &RequestCreated) -> String {
    let req = &r.request;
    match req.kind {
        RequestKind::Vacation => format!(
            "✅ Vacation request #{} filed: {} → {} ({})\n   Status: {}. Available before request: {}\n",
            req.id,
            req.start_date,
            req.end_date,
            plural(req.requested_days, "day", "days"),
            status_label(req.status),
            r.available_before.unwrap_or_default(),
        ),
        RequestKind::Sick => format!(
            "🤒 Sick leave #{} recorded: {} → {} ({})\n",
            req.id,
            req.start_date,
            req.end_date,
            plural(req.requested_days, "day", "days"),
        ),
    }
}

pub fn reviewed(r: &Reviewed) -> String {
    let mut out = format!(
        "Request #{}: {} → {}\n",
        r.request.id,
        status_label(r.previous),
        status_label(r.request.status),
    );
    if let Some(reason) = &r.request.rejection_reason {
        out.push_str(&format!("   Reason: {reason}\n"));
    }
    out
}

pub fn balance_adjusted(b: &BalanceAdjusted) -> String {
    format!(
        "✅ Balance of {} ({} {}): total {} → {}, available {}\n",
        b.balance.user_id,
        b.op.as_str(),
        b.days,
        b.previous_total.map_or("-".to_string(), |t| t.to_string()),
        b.balance.total_days,
        b.balance.available_days()
    )
}

pub fn reminder(r: &ReminderRecorded) -> String {
    format!(
        "⏰ Reminder for {} recorded, due {}: {}\n",
        r.target_user,
        format_stamp(&r.scheduled_for),
        r.message
    )
}

#[derive(Debug, Serialize)]
pub struct VacationStatus {
    pub balance: VacationBalance,
    pub available_days: i64,
    pub recent: Vec<VacationRequest>,
}

pub fn vacation_status(v: &VacationStatus) -> String {
    let b = &v.balance;
    let mut out = format!("{}\n", bold("🏖️  Vacation balance"));
    out.push_str(&format!("   Total:        {}\n", b.total_days));
    out.push_str(&format!("   Used:         {}\n", b.used_days));
    out.push_str(&format!("   Pending:      {}\n", b.pending_days));
    out.push_str(&format!("   Carried over: {}\n", b.carried_over_days));
    out.push_str(&format!(
        "   Available:    {}\n",
        colorize(&v.available_days.to_string(), color_for_available(v.available_days))
    ));

    if v.recent.is_empty() {
        return out;
    }
    let mut t = Table::new(&["#", "From", "To", "Days", "Status"]);
    for r in &v.recent {
        t.add_row(vec![
            r.id.to_string(),
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.requested_days.to_string(),
            status_label(r.status).to_string(),
        ]);
    }
    out.push('\n');
    out.push_str(&t.render());
    out
}

pub fn time_log(entries: &Vec<TimeEntry>) -> String {
    if entries.is_empty() {
        return colorize("No time entries in this period.\n", GREY);
    }
    let mut t = Table::new(&["When", "Entry", "Location", "Notes"]);
    for e in entries {
        t.add_row(vec![
            format_stamp(&e.timestamp),
            entry_label(&e.entry_type).to_string(),
            e.location.label().to_string(),
            e.notes.clone().unwrap_or_default(),
        ]);
    }
    t.render()
}

pub fn pending(rows: &Vec<LeaveRow>) -> String {
    if rows.is_empty() {
        return "✅ No pending requests.\n".to_string();
    }
    leave_table(rows)
}

fn leave_table(rows: &[LeaveRow]) -> String {
    let mut t = Table::new(&["#", "User", "From", "To", "Days", "Reason"]);
    for r in rows {
        t.add_row(vec![
            r.request_id.to_string(),
            r.username.clone(),
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.requested_days.to_string(),
            r.reason.clone().unwrap_or_default(),
        ]);
    }
    t.render()
}

fn presence_table(rows: &[PresenceRow], empty: &str) -> String {
    if rows.is_empty() {
        return format!("{empty}\n");
    }
    let mut t = Table::new(&["User", "Since", "Location"]);
    for r in rows {
        t.add_row(vec![
            r.username.clone(),
            format_clock(&r.since),
            r.location.label().to_string(),
        ]);
    }
    t.render()
}

fn entry_table(rows: &[EntryRow], empty: &str) -> String {
    if rows.is_empty() {
        return format!("{empty}\n");
    }
    let mut t = Table::new(&["User", "When", "Entry", "Location"]);
    for r in rows {
        t.add_row(vec![
            r.username.clone(),
            format_stamp(&r.timestamp),
            entry_label(&r.entry_type).to_string(),
            r.location.label().to_string(),
        ]);
    }
    t.render()
}

fn day_table(rows: &[DayCount]) -> String {
    let mut t = Table::new(&["User", "Days"]);
    for r in rows {
        t.add_row(vec![r.username.clone(), r.days.to_string()]);
    }
    t.render()
}

pub fn status(v: &StatusView) -> String {
    match v {
        StatusView::Online { rows } => presence_table(rows, "Nobody is working right now."),
        StatusView::OnBreak { rows } => presence_table(rows, "Nobody is on a break."),
        StatusView::OnVacation { rows } => {
            if rows.is_empty() {
                "Nobody is on vacation today.\n".to_string()
            } else {
                leave_table(rows)
            }
        }
        StatusView::OffDuty { window_hours, rows } => {
            entry_table(rows, &format!("Nobody went off in the last {window_hours}h."))
        }
        StatusView::TeamOverview { counts } => format!(
            "🟢 Online:      {}\n☕ On break:    {}\n🏖️  On vacation: {}\n🌙 Off duty:    {}\n",
            counts.online, counts.on_break, counts.on_vacation, counts.off_duty
        ),
    }
}

pub fn schedule(v: &ScheduleView) -> String {
    match v {
        ScheduleView::Today { users } => {
            if users.is_empty() {
                return "No activity today.\n".to_string();
            }
            let mut out = String::new();
            for u in users {
                out.push_str(&format!("{}\n", bold(&u.username)));
                for e in &u.entries {
                    out.push_str(&format!(
                        "   {} {} ({})\n",
                        format_clock(&e.timestamp),
                        entry_label(&e.entry_type),
                        e.location.label()
                    ));
                }
            }
            out
        }
        ScheduleView::Week { rows } => day_table(rows),
        ScheduleView::VacationCalendar { rows } => {
            if rows.is_empty() {
                "No upcoming vacations.\n".to_string()
            } else {
                leave_table(rows)
            }
        }
    }
}

pub fn report(v: &ReportView) -> String {
    match v {
        ReportView::TimeToday { entries } => entry_table(entries, "No entries today."),
        ReportView::VacationPending { requests } => pending(requests),
        ReportView::UserActivity { days, users } => {
            let mut t = Table::new(&["User", "Last active"]);
            for u in users {
                t.add_row(vec![u.username.clone(), format_stamp(&u.last_active)]);
            }
            format!("Active in the last {}\n{}", plural(*days, "day", "days"), t.render())
        }
        ReportView::VacationUsage { rows } => {
            let mut t = Table::new(&["User", "Total", "Used", "Pending", "Available"]);
            for r in rows {
                t.add_row(vec![
                    r.username.clone(),
                    r.total_days.to_string(),
                    r.used_days.to_string(),
                    r.pending_days.to_string(),
                    r.available_days.to_string(),
                ]);
            }
            t.render()
        }
        ReportView::WorkHours { days, rows } => {
            let mut t = Table::new(&["User", "Worked", "Breaks", "Shifts"]);
            for r in rows {
                t.add_row(vec![
                    r.username.clone(),
                    format_duration(r.worked_secs),
                    format_duration(r.break_secs),
                    r.shifts.to_string(),
                ]);
            }
            format!("Work hours, last {}\n{}", plural(*days, "day", "days"), t.render())
        }
        ReportView::MonthlyAttendance { year, month, rows } => {
            format!("Attendance {year}-{month:02}\n{}", day_table(rows))
        }
        ReportView::Productivity { days, rows } => {
            let mut t = Table::new(&["User", "Work days", "Breaks"]);
            for r in rows {
                t.add_row(vec![
                    r.username.clone(),
                    r.work_days.to_string(),
                    r.breaks_taken.to_string(),
                ]);
            }
            format!("Productivity, last {}\n{}", plural(*days, "day", "days"), t.render())
        }
    }
}
