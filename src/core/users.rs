use crate::db::users::{register_user, upsert_user};
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

/// Who is acting: the resolved identity handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub struct UserLogic;

impl UserLogic {
    /// Idempotent: first sight inserts, later calls refresh name and activity.
    pub fn ensure(conn: &Connection, actor: &Actor, now: DateTime<Utc>) -> AppResult<()> {
        upsert_user(conn, &actor.id, &actor.name, now)?;
        debug!(user = %actor.id, "user touched");
        Ok(())
    }

    /// Someone the actor refers to (a balance target, a reminder recipient).
    /// Their last activity is left untouched.
    pub fn ensure_target(conn: &Connection, id: &str, name: Option<&str>) -> AppResult<()> {
        register_user(conn, id, name)
    }
}
