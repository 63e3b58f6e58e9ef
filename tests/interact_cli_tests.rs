use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::fs;

mod common;
use common::{init_test_db, rti};

fn interaction(command: &str, options: &str) -> String {
    format!(r#"{{"command":"{command}","user":{{"id":"42","username":"amra"}},"options":{options}}}"#)
}

#[test]
fn test_interaction_from_stdin() {
    let db_path = init_test_db("cli_interact_stdin");

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin(interaction("clock-in", r#"[{"name":"location","value":"home"}]"#))
        .assert()
        .success()
        .stdout(contains("Clocked in"));

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin(interaction("wfo", "[]"))
        .assert()
        .failure()
        .stderr(contains("Already clocked in"));

    rti()
        .args(["--db", &db_path, "--json", "status", "online"])
        .assert()
        .success()
        .stdout(contains("\"username\": \"amra\""));
}

#[test]
fn test_interaction_from_file() {
    let db_path = init_test_db("cli_interact_file");
    let mut path = env::temp_dir();
    path.push("cli_interact_file_payload.json");
    fs::write(
        &path,
        interaction(
            "report",
            r#"[{"name":"type","value":"work-hours"},{"name":"days","value":3}]"#,
        ),
    )
    .unwrap();

    rti()
        .args(["--db", &db_path, "interact", "--file", &path.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("Work hours, last 3 days"));

    fs::remove_file(&path).ok();
}

#[test]
fn test_interaction_errors() {
    let db_path = init_test_db("cli_interact_errors");

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin(interaction("moonwalk", "[]"))
        .assert()
        .failure()
        .stderr(contains("Unknown command: moonwalk"));

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin(interaction("remind", r#"[{"name":"user","value":"7"}]"#))
        .assert()
        .failure()
        .stderr(contains("Missing required option `message`"));

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(contains("Invalid interaction payload"));
}

#[test]
fn test_remind_is_recorded_in_the_log() {
    let db_path = init_test_db("cli_interact_remind");

    rti()
        .args(["--db", &db_path, "interact"])
        .write_stdin(interaction(
            "remind",
            r#"[{"name":"user","value":"7"},{"name":"message","value":"standup"},{"name":"when","value":15}]"#,
        ))
        .assert()
        .success()
        .stdout(contains("Reminder for 7"));

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("reminder_sent").and(contains("standup")));
}
