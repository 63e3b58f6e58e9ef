use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::reports::{ReportLogic, ReportParams};
use crate::errors::AppResult;
use crate::ui::render::{self, emit};

/// Handle status / schedule / report
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let mut pool = ctx.open()?;

    match cmd {
        Commands::Status { kind } => {
            let v = ReportLogic::status(&mut pool, *kind, ctx.cfg.off_duty_window_hours, ctx.now)?;
            emit(ctx.json, &v, render::status)
        }
        Commands::Schedule { kind } => {
            let v = ReportLogic::schedule(&mut pool, *kind, ctx.now)?;
            emit(ctx.json, &v, render::schedule)
        }
        Commands::Report {
            kind,
            days,
            month,
            year,
        } => {
            let params = ReportParams {
                days: *days,
                month: *month,
                year: *year,
            };
            let v = ReportLogic::report(&mut pool, *kind, params, ctx.now)?;
            emit(ctx.json, &v, render::report)
        }
        _ => Ok(()),
    }
}
