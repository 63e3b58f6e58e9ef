use crate::errors::{AppError, AppResult};
use crate::utils::time::to_db_ts;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::{debug, info};

/// A named, one-shot schema change.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_core_tables",
        description: "Created users, balance, requests, time entries and active sessions tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id           TEXT PRIMARY KEY,
            username     TEXT NOT NULL,
            last_active  TEXT
        );

        CREATE TABLE IF NOT EXISTS user_vacation_balance (
            user_id           TEXT PRIMARY KEY REFERENCES users(id),
            total_days        INTEGER NOT NULL DEFAULT 0 CHECK(total_days >= 0),
            used_days         INTEGER NOT NULL DEFAULT 0 CHECK(used_days >= 0),
            pending_days      INTEGER NOT NULL DEFAULT 0 CHECK(pending_days >= 0),
            carried_over_days INTEGER NOT NULL DEFAULT 0 CHECK(carried_over_days >= 0),
            last_updated      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vacation_requests (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            TEXT NOT NULL REFERENCES users(id),
            kind               TEXT NOT NULL DEFAULT 'vacation' CHECK(kind IN ('vacation','sick')),
            requested_days     INTEGER NOT NULL CHECK(requested_days > 0),
            start_date         TEXT NOT NULL,
            end_date           TEXT NOT NULL,
            reason             TEXT,
            status             TEXT NOT NULL DEFAULT 'pending'
                               CHECK(status IN ('pending','pm_approved','admin_approved','rejected')),
            pm_approved_by     TEXT,
            pm_approved_at     TEXT,
            admin_approved_by  TEXT,
            admin_approved_at  TEXT,
            rejected_by        TEXT,
            rejected_at        TEXT,
            rejection_reason   TEXT,
            created_at         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL REFERENCES users(id),
            entry_type  TEXT NOT NULL
                        CHECK(entry_type IN ('clock_in','clock_out','pauza_start','pauza_end','off','off_sick')),
            timestamp   TEXT NOT NULL,
            location    TEXT NOT NULL DEFAULT 'office' CHECK(location IN ('office','home','away')),
            notes       TEXT
        );

        CREATE TABLE IF NOT EXISTS active_sessions (
            user_id       TEXT PRIMARY KEY REFERENCES users(id),
            session_type  TEXT NOT NULL CHECK(session_type IN ('work','break')),
            start_time    TEXT NOT NULL,
            location      TEXT NOT NULL CHECK(location IN ('office','home'))
        );
        "#,
    },
    Migration {
        version: "20250301_0002_indexes",
        description: "Added lookup indexes for ledger and request queues",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_time_entries_user_ts ON time_entries(user_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_time_entries_type_ts ON time_entries(entry_type, timestamp);
        CREATE INDEX IF NOT EXISTS idx_requests_status_created ON vacation_requests(status, created_at);
        CREATE INDEX IF NOT EXISTS idx_requests_user_created ON vacation_requests(user_id, created_at);
        "#,
    },
];

/// Ensure that the `audit_log` table exists; migrations are recorded in it.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL,
            user_id     TEXT NOT NULL DEFAULT '',
            action      TEXT NOT NULL,
            target      TEXT NOT NULL DEFAULT '',
            details     TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_audit_action ON audit_log(action, target);
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE action = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    // Schema change and its marker commit together.
    conn.execute_batch("BEGIN;")?;

    let result = conn.execute_batch(m.sql).and_then(|_| {
        conn.execute(
            "INSERT INTO audit_log (created_at, action, target, details)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![to_db_ts(&Utc::now()), m.version, m.description],
        )
    });

    match result {
        Ok(_) => {
            conn.execute_batch("COMMIT;")?;
            info!(version = m.version, "migration applied");
            Ok(())
        }
        Err(e) => {
            conn.execute_batch("ROLLBACK;")?;
            Err(AppError::Migration(format!("{}: {}", m.version, e)))
        }
    }
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_audit_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            debug!(version = m.version, "migration already applied");
            continue;
        }
        apply(conn, m)?;
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM audit_log
         WHERE action = 'migration_applied'
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_tables_carry_the_full_session_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let versions = applied_versions(&conn).unwrap();
        assert_eq!(versions, vec!["20250301_0001_core_tables", "20250301_0002_indexes"]);

        let mut stmt = conn.prepare("PRAGMA table_info(active_sessions)").unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |r| r.get::<_, String>(1))
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(cols, vec!["user_id", "session_type", "start_time", "location"]);
    }
}
