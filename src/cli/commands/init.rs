use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use chrono::Utc;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(custom_db: Option<&str>, is_test: bool) -> AppResult<()> {
    let cfg = Config::init_all(custom_db, is_test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing dutybot…");
    println!("🗄️  Database   : {db_path}");

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    let versions = applied_versions(&pool.conn)?;
    println!("📦 Schema     : {} migration(s) applied", versions.len());

    // Best effort: a failed log write does not undo the initialization.
    if let Err(e) = audit(
        &pool.conn,
        "",
        "init",
        &db_path,
        "Database initialized",
        Utc::now(),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!("Database initialized at {db_path}"));
    Ok(())
}
