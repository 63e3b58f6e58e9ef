//! dutybot library root.
//! Exposes the CLI parser, the high-level run() function and the core
//! modules a chat bot host can call directly.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::Utc;
use clap::Parser;
use crate::cli::commands::{self, Ctx};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::users::Actor;
use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Acting user from `--user`/`--name`, falling back to the config.
fn resolve_actor(cli: &Cli, cfg: &Config) -> Option<Actor> {
    let id = cli.user.clone().or_else(|| cfg.default_user.clone())?;
    let name = cli
        .name
        .clone()
        .or_else(|| cfg.default_display_name.clone())
        .unwrap_or_else(|| id.clone());
    Some(Actor::new(id, name))
}

/// Run one command against an existing context.
pub fn execute(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    match cmd {
        // Needs the raw --db/--test flags; only reachable through dispatch.
        Commands::Init => Err(AppError::UnknownCommand("init".into())),
        Commands::Config { .. } => commands::config::handle(cmd, ctx),
        Commands::Log { .. } => commands::log::handle(cmd, ctx),
        Commands::ClockIn { .. }
        | Commands::Wfh
        | Commands::Wfo
        | Commands::ClockOut
        | Commands::PauzaStart
        | Commands::PauzaEnd
        | Commands::Off => commands::session::handle(cmd, ctx),
        Commands::VacationRequest { .. }
        | Commands::SickLeave { .. }
        | Commands::VacationStatus
        | Commands::TimeLog { .. } => commands::vacation::handle(cmd, ctx),
        Commands::AdminSetBalance { .. }
        | Commands::AdminAddDays { .. }
        | Commands::AdminRemoveDays { .. } => commands::admin::handle(cmd, ctx),
        Commands::PmPending
        | Commands::PmApprove { .. }
        | Commands::PmDeny { .. }
        | Commands::AdminApprove { .. }
        | Commands::AdminDeny { .. } => commands::review::handle(cmd, ctx),
        Commands::Status { .. } | Commands::Schedule { .. } | Commands::Report { .. } => {
            commands::views::handle(cmd, ctx)
        }
        Commands::Remind { .. } => commands::remind::handle(cmd, ctx),
        Commands::Interact { .. } => commands::interact::handle(cmd, ctx),
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Init = cli.command {
        return commands::init::handle(cli.db.as_deref(), cli.test);
    }

    let ctx = Ctx {
        cfg,
        actor: resolve_actor(cli, cfg),
        json: cli.json,
        now: Utc::now(),
    };
    execute(&cli.command, &ctx)
}

/// `RUST_LOG` wins; otherwise the configured level. Logs go to stderr.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    init_tracing(&cfg.log_level);

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg).inspect_err(|e| {
        if e.is_store_failure() {
            tracing::error!(error = %e, "store failure");
        } else if e.is_domain() {
            tracing::debug!(error = %e, "command refused");
        }
    })
}
