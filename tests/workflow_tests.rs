use chrono::NaiveDate;
use dutybot::core::balance::BalanceLogic;
use dutybot::core::ledger::LedgerLogic;
use dutybot::core::reports::{ReportKind, ReportLogic, ReportParams, ReportView};
use dutybot::core::workflow::{LeaveInput, ReviewAction, WorkflowLogic};
use dutybot::db::log::load_audit_by_action;
use dutybot::db::pool::DbPool;
use dutybot::errors::AppError;
use dutybot::models::balance::BalanceOp;
use dutybot::models::entry_type::EntryType;
use dutybot::models::request::{RequestKind, RequestStatus};

mod common;
use common::{add_user, at, memory_pool};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn leave(user: &str, days: i64) -> LeaveInput {
    LeaveInput {
        user_id: user.to_string(),
        start_date: day(7, 1),
        end_date: day(7, 14),
        working_days: days,
        reason: Some("summer".into()),
    }
}

fn grant(pool: &mut DbPool, user: &str, days: i64) {
    BalanceLogic::adjust(pool, "admin", user, BalanceOp::Set, days, at(8, 0)).unwrap();
}

fn setup() -> DbPool {
    let pool = memory_pool();
    add_user(&pool, "admin", "boss", at(8, 0));
    add_user(&pool, "a", "amra", at(8, 0));
    pool
}

#[test]
fn requesting_exactly_the_available_days_succeeds() {
    let mut pool = setup();
    grant(&mut pool, "a", 10);

    let created = WorkflowLogic::request_leave(&mut pool, &leave("a", 10), at(9, 0)).unwrap();
    assert_eq!(created.request.status, RequestStatus::Pending);
    assert_eq!(created.available_before, Some(10));

    let b = BalanceLogic::require(&mut pool, "a").unwrap();
    assert_eq!(b.pending_days, 10);
    assert_eq!(b.available_days(), 0);

    let err = WorkflowLogic::request_leave(&mut pool, &leave("a", 1), at(9, 5)).unwrap_err();
    assert!(matches!(err, AppError::InsufficientBalance { available: 0 }));
}

#[test]
fn more_than_available_is_refused_without_side_effects() {
    let mut pool = setup();
    grant(&mut pool, "a", 4);

    let err = WorkflowLogic::request_leave(&mut pool, &leave("a", 5), at(9, 0)).unwrap_err();
    assert!(matches!(err, AppError::InsufficientBalance { available: 4 }));
    assert!(WorkflowLogic::pending_requests(&mut pool).unwrap().is_empty());
    assert_eq!(BalanceLogic::require(&mut pool, "a").unwrap().pending_days, 0);
}

#[test]
fn request_without_balance_is_balance_not_found() {
    let mut pool = setup();
    let err = WorkflowLogic::request_leave(&mut pool, &leave("a", 1), at(9, 0)).unwrap_err();
    assert!(matches!(err, AppError::BalanceNotFound(u) if u == "a"));
}

#[test]
fn reversed_range_is_rejected() {
    let mut pool = setup();
    grant(&mut pool, "a", 10);
    let input = LeaveInput {
        start_date: day(7, 10),
        end_date: day(7, 1),
        ..leave("a", 2)
    };
    let err = WorkflowLogic::request_leave(&mut pool, &input, at(9, 0)).unwrap_err();
    assert!(matches!(err, AppError::InvalidDateRange { .. }));
}

#[test]
fn full_approval_moves_days_to_used() {
    let mut pool = setup();
    grant(&mut pool, "a", 20);
    pool.conn
        .execute("UPDATE user_vacation_balance SET used_days = 5 WHERE user_id = 'a'", [])
        .unwrap();

    let created = WorkflowLogic::request_leave(&mut pool, &leave("a", 10), at(9, 0)).unwrap();
    assert_eq!(created.available_before, Some(15));
    let id = created.request.id;

    let r = WorkflowLogic::pm_approve(&mut pool, id, "pm", at(10, 0)).unwrap();
    assert_eq!(r.previous, RequestStatus::Pending);
    assert_eq!(r.request.status, RequestStatus::PmApproved);
    assert_eq!(r.request.pm_approved_by.as_deref(), Some("pm"));

    let r = WorkflowLogic::admin_approve(&mut pool, id, "admin", at(11, 0)).unwrap();
    assert_eq!(r.request.status, RequestStatus::AdminApproved);
    assert_eq!(r.request.admin_approved_at, Some(at(11, 0)));

    let b = BalanceLogic::require(&mut pool, "a").unwrap();
    assert_eq!((b.total_days, b.used_days, b.pending_days), (20, 15, 0));
    assert_eq!(b.available_days(), 5);

    assert_eq!(load_audit_by_action(&pool.conn, "pm_approve").unwrap().len(), 1);
    assert_eq!(load_audit_by_action(&pool.conn, "admin_approve").unwrap().len(), 1);
}

#[test]
fn admin_approval_needs_pm_approval_first() {
    let mut pool = setup();
    grant(&mut pool, "a", 20);
    let id = WorkflowLogic::request_leave(&mut pool, &leave("a", 3), at(9, 0))
        .unwrap()
        .request
        .id;

    let err = WorkflowLogic::admin_approve(&mut pool, id, "admin", at(10, 0)).unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition { from, action: "admin_approve", .. } if from == "pending"
    ));
    assert_eq!(WorkflowLogic::get(&mut pool, id).unwrap().status, RequestStatus::Pending);
}

#[test]
fn rejection_requires_a_reason_and_releases_days() {
    let mut pool = setup();
    grant(&mut pool, "a", 20);
    let id = WorkflowLogic::request_leave(&mut pool, &leave("a", 6), at(9, 0))
        .unwrap()
        .request
        .id;

    let err = WorkflowLogic::pm_reject(&mut pool, id, "pm", "  ", at(10, 0)).unwrap_err();
    assert!(matches!(err, AppError::ReasonRequired));
    let err = WorkflowLogic::review(&mut pool, id, ReviewAction::AdminReject, "admin", None, at(10, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::ReasonRequired));

    let r = WorkflowLogic::pm_reject(&mut pool, id, "pm", "team offsite", at(10, 0)).unwrap();
    assert_eq!(r.request.status, RequestStatus::Rejected);
    assert_eq!(r.request.rejected_by.as_deref(), Some("pm"));
    assert_eq!(r.request.rejection_reason.as_deref(), Some("team offsite"));

    let b = BalanceLogic::require(&mut pool, "a").unwrap();
    assert_eq!((b.used_days, b.pending_days), (0, 0));
}

#[test]
fn admin_can_reject_after_pm_approval() {
    let mut pool = setup();
    grant(&mut pool, "a", 20);
    let id = WorkflowLogic::request_leave(&mut pool, &leave("a", 2), at(9, 0))
        .unwrap()
        .request
        .id;
    WorkflowLogic::pm_approve(&mut pool, id, "pm", at(10, 0)).unwrap();

    let r = WorkflowLogic::admin_reject(&mut pool, id, "admin", "budget", at(11, 0)).unwrap();
    assert_eq!(r.previous, RequestStatus::PmApproved);
    assert_eq!(r.request.status, RequestStatus::Rejected);
}

#[test]
fn terminal_requests_accept_no_review() {
    let mut pool = setup();
    grant(&mut pool, "a", 20);
    let id = WorkflowLogic::request_leave(&mut pool, &leave("a", 2), at(9, 0))
        .unwrap()
        .request
        .id;
    WorkflowLogic::pm_approve(&mut pool, id, "pm", at(10, 0)).unwrap();
    WorkflowLogic::admin_approve(&mut pool, id, "admin", at(11, 0)).unwrap();

    for action in [
        ReviewAction::PmApprove,
        ReviewAction::AdminApprove,
        ReviewAction::PmReject,
        ReviewAction::AdminReject,
    ] {
        let err = WorkflowLogic::review(&mut pool, id, action, "x", Some("again"), at(12, 0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }), "{action:?}");
    }

    let b = BalanceLogic::require(&mut pool, "a").unwrap();
    assert_eq!(b.used_days, 2);
}

#[test]
fn unknown_request_is_not_found() {
    let mut pool = setup();
    let err = WorkflowLogic::pm_approve(&mut pool, 999, "pm", at(10, 0)).unwrap_err();
    assert!(matches!(err, AppError::RequestNotFound(999)));
}

#[test]
fn sick_leave_is_approved_on_creation_without_balance() {
    let mut pool = setup();

    let created = WorkflowLogic::request_sick_leave(
        &mut pool,
        &LeaveInput {
            reason: Some("flu".into()),
            ..leave("a", 3)
        },
        at(8, 30),
    )
    .unwrap();

    assert_eq!(created.request.kind, RequestKind::Sick);
    assert_eq!(created.request.status, RequestStatus::AdminApproved);
    assert_eq!(created.request.admin_approved_by.as_deref(), Some("a"));
    assert!(created.available_before.is_none());
    assert!(BalanceLogic::get(&mut pool, "a").unwrap().is_none());

    let entries = LedgerLogic::history(&mut pool, "a", 1, at(9, 0)).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_type, EntryType::OffSick);
    assert_eq!(entries[0].notes.as_deref(), Some("Sick leave: flu"));

    // Not part of the approval queue.
    assert!(WorkflowLogic::pending_requests(&mut pool).unwrap().is_empty());
}

#[test]
fn sick_leave_needs_a_reason() {
    let mut pool = setup();
    let input = LeaveInput {
        reason: None,
        ..leave("a", 1)
    };
    let err = WorkflowLogic::request_sick_leave(&mut pool, &input, at(8, 30)).unwrap_err();
    assert!(matches!(err, AppError::MissingOption(n) if n == "reason"));
}

#[test]
fn remove_never_goes_below_zero() {
    let mut pool = setup();
    grant(&mut pool, "a", 7);

    let r = BalanceLogic::adjust(&mut pool, "admin", "a", BalanceOp::Remove, 12, at(9, 0)).unwrap();
    assert_eq!(r.previous_total, Some(7));
    assert_eq!(r.balance.total_days, 0);

    let r = BalanceLogic::adjust(&mut pool, "admin", "a", BalanceOp::Add, 3, at(9, 5)).unwrap();
    assert_eq!(r.balance.total_days, 3);
    assert_eq!(load_audit_by_action(&pool.conn, "balance_remove").unwrap().len(), 1);
}

#[test]
fn add_or_remove_need_an_existing_balance() {
    let mut pool = setup();
    let err = BalanceLogic::adjust(&mut pool, "admin", "a", BalanceOp::Add, 3, at(9, 0)).unwrap_err();
    assert!(matches!(err, AppError::BalanceNotFound(_)));
    assert!(load_audit_by_action(&pool.conn, "balance_add").unwrap().is_empty());
}

#[test]
fn recent_requests_newest_first() {
    let mut pool = setup();
    grant(&mut pool, "a", 30);
    for (i, h) in [9, 10, 11, 12].into_iter().enumerate() {
        WorkflowLogic::request_leave(&mut pool, &leave("a", 1 + i as i64), at(h, 0)).unwrap();
    }

    let recent = WorkflowLogic::recent_requests(&mut pool, "a", 3).unwrap();
    let days: Vec<i64> = recent.iter().map(|r| r.requested_days).collect();
    assert_eq!(days, vec![4, 3, 2]);

    let queue = WorkflowLogic::pending_requests(&mut pool).unwrap();
    assert_eq!(queue.first().map(|(r, _)| r.requested_days), Some(1));
    assert_eq!(queue[0].1, "amra");
}

#[test]
fn referenced_users_keep_their_activity() {
    use dutybot::core::users::UserLogic;
    use dutybot::db::users::load_user;

    let mut pool = setup();
    UserLogic::ensure_target(&pool.conn, "a", None).unwrap();
    let a = load_user(&pool.conn, "a").unwrap().unwrap();
    assert_eq!(a.username, "amra");
    assert_eq!(a.last_active, Some(at(8, 0)));

    UserLogic::ensure_target(&pool.conn, "z", Some("zoe")).unwrap();
    UserLogic::ensure_target(&pool.conn, "z", None).unwrap();
    let z = load_user(&pool.conn, "z").unwrap().unwrap();
    assert_eq!(z.username, "zoe");
    assert!(z.last_active.is_none());

    let view = ReportLogic::report(
        &mut pool,
        ReportKind::UserActivity,
        ReportParams::default(),
        at(16, 0),
    )
    .unwrap();
    let ReportView::UserActivity { users, .. } = view else {
        panic!("unexpected view");
    };
    let ids: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
    assert!(!ids.contains(&"z"));
    assert!(ids.contains(&"a"));

    // The first command of a referenced user counts as activity.
    add_user(&pool, "z", "zoe", at(16, 30));
    assert_eq!(
        load_user(&pool.conn, "z").unwrap().unwrap().last_active,
        Some(at(16, 30))
    );
}
