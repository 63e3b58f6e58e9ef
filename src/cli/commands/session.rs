use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::tracker::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::ui::render::{self, emit};

/// Handle clock-in / wfh / wfo / clock-out / pauza-start / pauza-end / off
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let (mut pool, actor) = ctx.open_as_actor()?;
    let now = ctx.now;

    match cmd {
        Commands::ClockIn { location } => {
            let loc = match location {
                Some(code) => {
                    Location::from_code(code).ok_or_else(|| AppError::InvalidLocation(code.clone()))?
                }
                None => ctx.cfg.location()?,
            };
            let r = SessionLogic::start_work(&mut pool, &actor.id, loc, now)?;
            emit(ctx.json, &r, render::clocked_in)
        }
        Commands::Wfh => {
            let r = SessionLogic::start_work(&mut pool, &actor.id, Location::Home, now)?;
            emit(ctx.json, &r, render::clocked_in)
        }
        Commands::Wfo => {
            let r = SessionLogic::start_work(&mut pool, &actor.id, Location::Office, now)?;
            emit(ctx.json, &r, render::clocked_in)
        }
        Commands::ClockOut => {
            let r = SessionLogic::end_work(&mut pool, &actor.id, now)?;
            emit(ctx.json, &r, render::session_closed)
        }
        Commands::PauzaStart => {
            let r = SessionLogic::start_break(&mut pool, &actor.id, now)?;
            emit(ctx.json, &r, render::break_started)
        }
        Commands::PauzaEnd => {
            let r = SessionLogic::end_break(&mut pool, &actor.id, now)?;
            emit(ctx.json, &r, render::session_closed)
        }
        Commands::Off => {
            let r = SessionLogic::mark_off(&mut pool, &actor.id, now)?;
            emit(ctx.json, &r, render::marked_off)
        }
        _ => Ok(()),
    }
}
