use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_test_db, rti};

fn grant(db_path: &str, target: &str, days: &str) {
    rti()
        .args([
            "--db",
            db_path,
            "--user",
            "admin",
            "admin-set-balance",
            target,
            days,
            "--target-name",
            "bruno",
        ])
        .assert()
        .success()
        .stdout(contains("Balance of"));
}

#[test]
fn test_request_and_two_stage_approval() {
    let db_path = init_test_db("cli_vacation_flow");
    grant(&db_path, "2", "20");

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "2",
            "vacation-request",
            "2030-07-01",
            "2030-07-10",
            "8",
            "--reason",
            "sea",
        ])
        .assert()
        .success()
        .stdout(contains("Vacation request #1").and(contains("pending")));

    rti()
        .args(["--db", &db_path, "pm-pending"])
        .assert()
        .success()
        .stdout(contains("bruno").and(contains("2030-07-01")));

    rti()
        .args(["--db", &db_path, "--user", "admin", "admin-approve", "1"])
        .assert()
        .failure()
        .stderr(contains("cannot admin_approve"));

    rti()
        .args(["--db", &db_path, "--user", "pm", "pm-approve", "1"])
        .assert()
        .success()
        .stdout(contains("pm approved"));

    rti()
        .args(["--db", &db_path, "--user", "admin", "admin-approve", "1"])
        .assert()
        .success()
        .stdout(contains("approved"));

    rti()
        .args(["--db", &db_path, "--user", "2", "--json", "vacation-status"])
        .assert()
        .success()
        .stdout(
            contains("\"used_days\": 8")
                .and(contains("\"pending_days\": 0"))
                .and(contains("\"available_days\": 12")),
        );
}

#[test]
fn test_insufficient_balance() {
    let db_path = init_test_db("cli_vacation_insufficient");
    grant(&db_path, "2", "3");

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "2",
            "vacation-request",
            "2030-07-01",
            "2030-07-10",
            "4",
        ])
        .assert()
        .failure()
        .stderr(contains("3 day(s) available"));
}

#[test]
fn test_rejection_needs_reason() {
    let db_path = init_test_db("cli_vacation_reject");
    grant(&db_path, "2", "10");

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "2",
            "vacation-request",
            "2030-01-02",
            "2030-01-03",
            "2",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "--user", "pm", "pm-deny", "1"])
        .assert()
        .failure()
        .stderr(contains("reason is required"));

    rti()
        .args(["--db", &db_path, "--user", "pm", "pm-deny", "1", "overlap"])
        .assert()
        .success()
        .stdout(contains("rejected").and(contains("overlap")));

    rti()
        .args(["--db", &db_path, "--user", "pm", "pm-approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Request 1 is rejected"));
}

#[test]
fn test_sick_leave_and_bad_dates() {
    let db_path = init_test_db("cli_sick_leave");

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "5",
            "sick-leave",
            "2030-02-01",
            "2030-02-03",
            "3",
            "flu",
        ])
        .assert()
        .success()
        .stdout(contains("Sick leave #1"));

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "5",
            "vacation-request",
            "2030-02-10",
            "2030-02-01",
            "3",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));

    rti()
        .args([
            "--db",
            &db_path,
            "--user",
            "5",
            "vacation-request",
            "02/10/2030",
            "2030-02-11",
            "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_balance_admin_commands() {
    let db_path = init_test_db("cli_balance_admin");

    rti()
        .args(["--db", &db_path, "--user", "admin", "admin-add-days", "9", "5"])
        .assert()
        .failure()
        .stderr(contains("No vacation balance"));

    grant(&db_path, "9", "4");

    rti()
        .args(["--db", &db_path, "--user", "admin", "admin-remove-days", "9", "9"])
        .assert()
        .success()
        .stdout(contains("total 4 → 0"));

    rti()
        .args(["--db", &db_path, "--user", "admin", "admin-add-days", "9", "101"])
        .assert()
        .failure();

    rti()
        .args(["--db", &db_path, "report", "vacation-usage"])
        .assert()
        .success()
        .stdout(contains("bruno"));
}
