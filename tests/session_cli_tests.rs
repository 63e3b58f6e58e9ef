use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_test_db, rti};

#[test]
fn test_clock_in_and_out() {
    let db_path = init_test_db("cli_clock_in_out");

    rti()
        .args(["--db", &db_path, "--user", "1", "--name", "amra", "clock-in", "--location", "home"])
        .assert()
        .success()
        .stdout(contains("Clocked in").and(contains("Home")));

    rti()
        .args(["--db", &db_path, "--user", "1", "wfo"])
        .assert()
        .failure()
        .stderr(contains("Already clocked in"));

    rti()
        .args(["--db", &db_path, "--user", "1", "clock-out"])
        .assert()
        .success()
        .stdout(contains("Clocked out"));

    rti()
        .args(["--db", &db_path, "--user", "1", "clock-out"])
        .assert()
        .failure()
        .stderr(contains("Not clocked in"));
}

#[test]
fn test_break_cycle() {
    let db_path = init_test_db("cli_break_cycle");

    rti()
        .args(["--db", &db_path, "--user", "7", "pauza-end"])
        .assert()
        .failure()
        .stderr(contains("Not on a break"));

    rti()
        .args(["--db", &db_path, "--user", "7", "wfh"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "--user", "7", "pauza-start"])
        .assert()
        .success()
        .stdout(contains("Break started"));

    rti()
        .args(["--db", &db_path, "--user", "7", "pauza-start"])
        .assert()
        .failure()
        .stderr(contains("Already on a break"));

    rti()
        .args(["--db", &db_path, "--user", "7", "pauza-end"])
        .assert()
        .success()
        .stdout(contains("Break over"));

    // Ending the break ends the shift as well.
    rti()
        .args(["--db", &db_path, "--user", "7", "clock-out"])
        .assert()
        .failure()
        .stderr(contains("Not clocked in"));
}

#[test]
fn test_invalid_location_is_rejected() {
    let db_path = init_test_db("cli_bad_location");

    rti()
        .args(["--db", &db_path, "--user", "1", "clock-in", "--location", "beach"])
        .assert()
        .failure()
        .stderr(contains("Invalid location"));
}

#[test]
fn test_json_output() {
    let db_path = init_test_db("cli_json_output");

    rti()
        .args(["--db", &db_path, "--user", "1", "--json", "clock-in", "-l", "wfh"])
        .assert()
        .success()
        .stdout(contains("\"location\": \"home\"").and(contains("\"closed_break\": false")));

    rti()
        .args(["--db", &db_path, "--user", "1", "--json", "off"])
        .assert()
        .success()
        .stdout(contains("\"ended\"").and(contains("\"session_type\": \"work\"")));

    rti()
        .args(["--db", &db_path, "--user", "1", "--json", "time-log", "--days", "1"])
        .assert()
        .success()
        .stdout(contains("\"entry_type\": \"off\""));
}

#[test]
fn test_time_log_days_range() {
    let db_path = init_test_db("cli_time_log_range");

    rti()
        .args(["--db", &db_path, "--user", "1", "time-log", "--days", "31"])
        .assert()
        .failure();
}

#[test]
fn test_log_print_lists_migrations() {
    let db_path = init_test_db("cli_log_print");

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));
}
