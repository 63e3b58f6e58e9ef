//! One handler module per command family. Every handler receives the
//! parsed command and the shared `Ctx`.

pub mod admin;
pub mod config;
pub mod init;
pub mod interact;
pub mod log;
pub mod remind;
pub mod review;
pub mod session;
pub mod vacation;
pub mod views;

use crate::config::Config;
use crate::core::users::{Actor, UserLogic};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// What every handler needs besides the command itself.
#[derive(Debug, Clone)]
pub struct Ctx<'a> {
    pub cfg: &'a Config,
    pub actor: Option<Actor>,
    pub json: bool,
    pub now: DateTime<Utc>,
}

impl Ctx<'_> {
    pub fn actor(&self) -> AppResult<&Actor> {
        self.actor
            .as_ref()
            .ok_or_else(|| AppError::MissingOption("user".into()))
    }

    /// Open the configured database with the schema up to date.
    pub fn open(&self) -> AppResult<DbPool> {
        let pool = DbPool::new(&self.cfg.database)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }

    /// Open the database and record the actor's activity.
    pub fn open_as_actor(&self) -> AppResult<(DbPool, &Actor)> {
        let actor = self.actor()?;
        let pool = self.open()?;
        UserLogic::ensure(&pool.conn, actor, self.now)?;
        Ok((pool, actor))
    }
}
