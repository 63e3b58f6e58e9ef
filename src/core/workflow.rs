//! Vacation request workflow.
//!
//! ```text
//! pending --pm_approve--> pm_approved --admin_approve--> admin_approved
//! pending --pm_reject / admin_reject-----------------> rejected
//! pm_approved --admin_reject-------------------------> rejected
//! ```
//! Sick leave is inserted directly as `admin_approved`. Terminal states
//! accept no further review.
//!
//! The balance ledger follows the workflow: a new vacation request
//! reserves its days in `pending_days`, final approval moves them to
//! `used_days`, rejection releases them.

use crate::core::ledger::LedgerLogic;
use crate::db::balance::{add_pending, load_balance, release_pending, settle_pending};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::requests::{
    insert_request, load_pending, load_recent_for_user, load_request, mark_admin_approved,
    mark_pm_approved, mark_rejected,
};
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::location::Location;
use crate::models::request::{RequestKind, RequestStatus, VacationRequest};
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::{info, warn};

pub const MAX_WORKING_DAYS: i64 = 365;

/// Input shared by vacation and sick-leave requests.
#[derive(Debug, Clone)]
pub struct LeaveInput {
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub working_days: i64,
    pub reason: Option<String>,
}

impl LeaveInput {
    fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_WORKING_DAYS).contains(&self.working_days) {
            return Err(AppError::InvalidOption {
                name: "working_days".into(),
                value: self.working_days.to_string(),
            });
        }
        if self.end_date < self.start_date {
            return Err(AppError::InvalidDateRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }
        Ok(())
    }

    fn to_request(&self, kind: RequestKind, status: RequestStatus, now: DateTime<Utc>) -> VacationRequest {
        let self_approved = status == RequestStatus::AdminApproved;
        VacationRequest {
            id: 0,
            user_id: self.user_id.clone(),
            kind,
            requested_days: self.working_days,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason.clone(),
            status,
            pm_approved_by: None,
            pm_approved_at: None,
            admin_approved_by: self_approved.then(|| self.user_id.clone()),
            admin_approved_at: self_approved.then_some(now),
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestCreated {
    pub request: VacationRequest,
    /// Available days at the moment of the check; absent for sick leave.
    pub available_before: Option<i64>,
}

/// One reviewer decision on an existing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    PmApprove,
    PmReject,
    AdminApprove,
    AdminReject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::PmApprove => "pm_approve",
            ReviewAction::PmReject => "pm_reject",
            ReviewAction::AdminApprove => "admin_approve",
            ReviewAction::AdminReject => "admin_reject",
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ReviewAction::PmReject | ReviewAction::AdminReject)
    }

    /// Target state, or None when `from` does not allow this action.
    pub fn next(&self, from: RequestStatus) -> Option<RequestStatus> {
        use RequestStatus::*;
        match (self, from) {
            (ReviewAction::PmApprove, Pending) => Some(PmApproved),
            (ReviewAction::PmReject, Pending) => Some(Rejected),
            (ReviewAction::AdminApprove, PmApproved) => Some(AdminApproved),
            (ReviewAction::AdminReject, Pending | PmApproved) => Some(Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Reviewed {
    pub action: ReviewAction,
    pub previous: RequestStatus,
    pub request: VacationRequest,
}

pub struct WorkflowLogic;

impl WorkflowLogic {
    /// File a vacation request. Balance check and insert share one
    /// immediate transaction, so concurrent requests cannot both pass.
    pub fn request_leave(
        pool: &mut DbPool,
        input: &LeaveInput,
        now: DateTime<Utc>,
    ) -> AppResult<RequestCreated> {
        input.validate()?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let balance = load_balance(&tx, &input.user_id)?
            .ok_or_else(|| AppError::BalanceNotFound(input.user_id.clone()))?;
        let available = balance.available_days();

        if input.working_days > available {
            warn!(
                user = %input.user_id,
                requested = input.working_days,
                available,
                "vacation request refused"
            );
            return Err(AppError::InsufficientBalance { available });
        }

        let mut request = input.to_request(RequestKind::Vacation, RequestStatus::Pending, now);
        request.id = insert_request(&tx, &request)?;
        add_pending(&tx, &input.user_id, input.working_days, now)?;

        tx.commit()?;

        info!(
            user = %input.user_id,
            request = request.id,
            days = input.working_days,
            "vacation request filed"
        );

        Ok(RequestCreated {
            request,
            available_before: Some(available),
        })
    }

    /// Sick leave: no balance check, approved on creation by the requester,
    /// one `off_sick` entry in the time ledger for the whole period.
    pub fn request_sick_leave(
        pool: &mut DbPool,
        input: &LeaveInput,
        now: DateTime<Utc>,
    ) -> AppResult<RequestCreated> {
        input.validate()?;
        let reason = input
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AppError::MissingOption("reason".into()))?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut request = input.to_request(RequestKind::Sick, RequestStatus::AdminApproved, now);
        request.id = insert_request(&tx, &request)?;

        let entry = TimeEntry::new(&input.user_id, EntryType::OffSick, Location::Away, now)
            .with_notes(format!("Sick leave: {reason}"));
        LedgerLogic::append(&tx, &entry)?;

        tx.commit()?;

        info!(user = %input.user_id, request = request.id, "sick leave recorded");

        Ok(RequestCreated {
            request,
            available_before: None,
        })
    }

    pub fn pm_approve(pool: &mut DbPool, id: i64, approver: &str, now: DateTime<Utc>) -> AppResult<Reviewed> {
        Self::review(pool, id, ReviewAction::PmApprove, approver, None, now)
    }

    pub fn pm_reject(
        pool: &mut DbPool,
        id: i64,
        approver: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Reviewed> {
        Self::review(pool, id, ReviewAction::PmReject, approver, Some(reason), now)
    }

    pub fn admin_approve(pool: &mut DbPool, id: i64, approver: &str, now: DateTime<Utc>) -> AppResult<Reviewed> {
        Self::review(pool, id, ReviewAction::AdminApprove, approver, None, now)
    }

    pub fn admin_reject(
        pool: &mut DbPool,
        id: i64,
        approver: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Reviewed> {
        Self::review(pool, id, ReviewAction::AdminReject, approver, Some(reason), now)
    }

    pub fn review(
        pool: &mut DbPool,
        id: i64,
        action: ReviewAction,
        approver: &str,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Reviewed> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if action.is_rejection() && reason.is_none() {
            return Err(AppError::ReasonRequired);
        }

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = load_request(&tx, id)?.ok_or(AppError::RequestNotFound(id))?;
        let next = action.next(current.status).ok_or_else(|| {
            warn!(
                request = id,
                from = current.status.to_db_str(),
                terminal = current.status.is_terminal(),
                action = action.as_str(),
                "review refused"
            );
            AppError::InvalidTransition {
                id,
                from: current.status.to_db_str().to_string(),
                action: action.as_str(),
            }
        })?;

        match next {
            RequestStatus::PmApproved => mark_pm_approved(&tx, id, approver, now)?,
            RequestStatus::AdminApproved => mark_admin_approved(&tx, id, approver, now)?,
            RequestStatus::Rejected => {
                mark_rejected(&tx, id, approver, reason.unwrap_or_default(), now)?
            }
            RequestStatus::Pending => {}
        }

        if current.kind == RequestKind::Vacation {
            match next {
                RequestStatus::AdminApproved => {
                    settle_pending(&tx, &current.user_id, current.requested_days, now)?
                }
                RequestStatus::Rejected => {
                    release_pending(&tx, &current.user_id, current.requested_days, now)?
                }
                _ => {}
            }
        }

        let details = serde_json::json!({
            "from": current.status.to_db_str(),
            "to": next.to_db_str(),
            "reason": reason,
        });
        audit(&tx, approver, action.as_str(), &id.to_string(), &details.to_string(), now)?;

        let request = load_request(&tx, id)?.ok_or(AppError::RequestNotFound(id))?;
        tx.commit()?;

        info!(
            request = id,
            approver = %approver,
            from = current.status.to_db_str(),
            to = next.to_db_str(),
            "request reviewed"
        );

        Ok(Reviewed {
            action,
            previous: current.status,
            request,
        })
    }

    /// Approval queue, oldest first.
    pub fn pending_requests(pool: &mut DbPool) -> AppResult<Vec<(VacationRequest, String)>> {
        load_pending(&pool.conn)
    }

    pub fn recent_requests(pool: &mut DbPool, user_id: &str, limit: i64) -> AppResult<Vec<VacationRequest>> {
        load_recent_for_user(&pool.conn, user_id, limit)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<VacationRequest> {
        load_request(&pool.conn, id)?.ok_or(AppError::RequestNotFound(id))
    }
}
