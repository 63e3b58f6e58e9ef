#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use dutybot::core::users::{Actor, UserLogic};
use dutybot::db::initialize::init_db;
use dutybot::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("dutybot")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dutybot.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh database file with the schema in place.
pub fn init_test_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// In-memory store with the schema applied.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

/// Monday 2025-03-10 at `h:m` UTC.
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
}

pub fn add_user(pool: &DbPool, id: &str, name: &str, now: DateTime<Utc>) -> Actor {
    let actor = Actor::new(id, name);
    UserLogic::ensure(&pool.conn, &actor, now).unwrap();
    actor
}
