//! Session tracker: the work / break / off state machine.
//!
//! A user is in one of three states: no open session, an open `work`
//! session, or an open `break` session. `plan` is the whole transition
//! table; `SessionLogic` loads the current state, asks `plan` for the
//! steps and applies them inside a single immediate transaction, so a
//! multi-step transition (close break, open work, record clock_in)
//! commits entirely or not at all. Ending a break leaves the user with no
//! open session.

use crate::core::ledger::LedgerLogic;
use crate::db::pool::DbPool;
use crate::db::sessions::{delete_session, insert_session, load_session};
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::location::Location;
use crate::models::session::{ActiveSession, SessionType};
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    StartWork(Location),
    EndWork,
    StartBreak,
    EndBreak,
    MarkOff,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::StartWork(_) => "start_work",
            SessionCommand::EndWork => "end_work",
            SessionCommand::StartBreak => "start_break",
            SessionCommand::EndBreak => "end_break",
            SessionCommand::MarkOff => "mark_off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Close(SessionType),
    Open(SessionType, Location),
    Record(EntryType, Location),
}

/// Transition table: the steps `cmd` takes from `current`, or the domain
/// error that refuses it. Pure; nothing is read or written here.
pub fn plan(current: Option<&ActiveSession>, cmd: SessionCommand) -> AppResult<Vec<Step>> {
    use SessionCommand::*;
    use SessionType::{Break, Work};

    let state = current.map(|s| (s.session_type, s.location));

    match (cmd, state) {
        (StartWork(loc), _) if !loc.is_workplace() => {
            Err(AppError::InvalidLocation(loc.to_db_str().to_string()))
        }
        (StartWork(_), Some((Work, _))) => Err(AppError::AlreadyWorking),
        // An open break is closed silently: no pauza_end, no duration.
        (StartWork(loc), Some((Break, _))) => Ok(vec![
            Step::Close(Break),
            Step::Open(Work, loc),
            Step::Record(EntryType::ClockIn, loc),
        ]),
        (StartWork(loc), None) => Ok(vec![
            Step::Open(Work, loc),
            Step::Record(EntryType::ClockIn, loc),
        ]),

        // Any open session satisfies clock-out.
        (EndWork, Some((kind, loc))) => Ok(vec![
            Step::Close(kind),
            Step::Record(EntryType::ClockOut, loc),
        ]),
        (EndWork, None) => Err(AppError::NotWorking),

        (StartBreak, Some((Work, loc))) => Ok(vec![
            Step::Close(Work),
            Step::Open(Break, loc),
            Step::Record(EntryType::PauzaStart, loc),
        ]),
        (StartBreak, Some((Break, _))) => Err(AppError::AlreadyOnBreak),
        (StartBreak, None) => Err(AppError::NotWorking),

        (EndBreak, Some((Break, loc))) => Ok(vec![
            Step::Close(Break),
            Step::Record(EntryType::PauzaEnd, loc),
        ]),
        (EndBreak, _) => Err(AppError::NotOnBreak),

        // Only a work session is clocked out; an open break stays as it is.
        (MarkOff, Some((Work, loc))) => Ok(vec![
            Step::Close(Work),
            Step::Record(EntryType::ClockOut, loc),
            Step::Record(EntryType::Off, Location::Away),
        ]),
        (MarkOff, _) => Ok(vec![Step::Record(EntryType::Off, Location::Away)]),
    }
}

/// What a committed transition did.
#[derive(Debug, Clone)]
pub struct Transition {
    pub closed: Option<ActiveSession>,
    pub opened: Option<ActiveSession>,
    pub recorded: Vec<EntryType>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockedIn {
    pub user_id: String,
    pub location: Location,
    pub started_at: DateTime<Utc>,
    /// A break was open and got closed to start this session.
    pub closed_break: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionClosed {
    pub user_id: String,
    pub session_type: SessionType,
    pub location: Location,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
}

impl SessionClosed {
    fn from_session(s: &ActiveSession, now: DateTime<Utc>) -> Self {
        Self {
            user_id: s.user_id.clone(),
            session_type: s.session_type,
            location: s.location,
            started_at: s.start_time,
            ended_at: now,
            duration_secs: s.elapsed_secs(now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakStarted {
    pub user_id: String,
    pub location: Location,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkedOff {
    pub user_id: String,
    pub at: DateTime<Utc>,
    pub ended: Option<SessionClosed>,
}

pub struct SessionLogic;

impl SessionLogic {
    pub fn current(pool: &mut DbPool, user_id: &str) -> AppResult<Option<ActiveSession>> {
        load_session(&pool.conn, user_id)
    }

    pub fn start_work(
        pool: &mut DbPool,
        user_id: &str,
        location: Location,
        now: DateTime<Utc>,
    ) -> AppResult<ClockedIn> {
        let t = Self::execute(pool, user_id, SessionCommand::StartWork(location), now)?;
        Ok(ClockedIn {
            user_id: user_id.to_string(),
            location,
            started_at: now,
            closed_break: t.closed.is_some(),
        })
    }

    pub fn end_work(pool: &mut DbPool, user_id: &str, now: DateTime<Utc>) -> AppResult<SessionClosed> {
        let t = Self::execute(pool, user_id, SessionCommand::EndWork, now)?;
        let closed = t.closed.as_ref().ok_or(AppError::NotWorking)?;
        Ok(SessionClosed::from_session(closed, now))
    }

    pub fn start_break(pool: &mut DbPool, user_id: &str, now: DateTime<Utc>) -> AppResult<BreakStarted> {
        let t = Self::execute(pool, user_id, SessionCommand::StartBreak, now)?;
        let opened = t.opened.as_ref().ok_or(AppError::NotWorking)?;
        Ok(BreakStarted {
            user_id: user_id.to_string(),
            location: opened.location,
            started_at: now,
        })
    }

    pub fn end_break(pool: &mut DbPool, user_id: &str, now: DateTime<Utc>) -> AppResult<SessionClosed> {
        let t = Self::execute(pool, user_id, SessionCommand::EndBreak, now)?;
        let closed = t.closed.as_ref().ok_or(AppError::NotOnBreak)?;
        Ok(SessionClosed::from_session(closed, now))
    }

    pub fn mark_off(pool: &mut DbPool, user_id: &str, now: DateTime<Utc>) -> AppResult<MarkedOff> {
        let t = Self::execute(pool, user_id, SessionCommand::MarkOff, now)?;
        Ok(MarkedOff {
            user_id: user_id.to_string(),
            at: now,
            ended: t.closed.as_ref().map(|s| SessionClosed::from_session(s, now)),
        })
    }

    /// Load, plan and apply one command atomically.
    pub fn execute(
        pool: &mut DbPool,
        user_id: &str,
        cmd: SessionCommand,
        now: DateTime<Utc>,
    ) -> AppResult<Transition> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = load_session(&tx, user_id)?;
        let steps = plan(current.as_ref(), cmd).inspect_err(|e| {
            warn!(user = %user_id, command = cmd.name(), error = %e, "transition refused");
        })?;

        let mut t = Transition {
            closed: None,
            opened: None,
            recorded: Vec::new(),
            at: now,
        };

        for step in steps {
            match step {
                Step::Close(kind) => {
                    // Read in this transaction a moment ago; absence means the row is gone.
                    let removed = delete_session(&tx, user_id, kind)?.ok_or(AppError::NotWorking)?;
                    t.closed = Some(removed);
                }
                Step::Open(kind, location) => {
                    let session = ActiveSession {
                        user_id: user_id.to_string(),
                        session_type: kind,
                        start_time: now,
                        location,
                    };
                    insert_session(&tx, &session)?;
                    t.opened = Some(session);
                }
                Step::Record(entry_type, location) => {
                    LedgerLogic::append(&tx, &TimeEntry::new(user_id, entry_type, location, now))?;
                    t.recorded.push(entry_type);
                }
            }
        }

        tx.commit()?;

        info!(
            user = %user_id,
            command = cmd.name(),
            recorded = t.recorded.len(),
            "session transition committed"
        );
        Ok(t)
    }
}
