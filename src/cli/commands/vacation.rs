use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::balance::BalanceLogic;
use crate::core::ledger::LedgerLogic;
use crate::core::workflow::{LeaveInput, WorkflowLogic};
use crate::errors::AppResult;
use crate::ui::render::{self, VacationStatus, emit};
use crate::utils::date::parse_range;

/// Handle vacation-request / sick-leave / vacation-status / time-log
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let (mut pool, actor) = ctx.open_as_actor()?;
    let now = ctx.now;

    match cmd {
        Commands::VacationRequest {
            start_date,
            end_date,
            working_days,
            reason,
        } => {
            let (start, end) = parse_range(start_date, end_date)?;
            let input = LeaveInput {
                user_id: actor.id.clone(),
                start_date: start,
                end_date: end,
                working_days: *working_days,
                reason: reason.clone(),
            };
            let r = WorkflowLogic::request_leave(&mut pool, &input, now)?;
            emit(ctx.json, &r, render::request_created)
        }
        Commands::SickLeave {
            start_date,
            end_date,
            working_days,
            reason,
        } => {
            let (start, end) = parse_range(start_date, end_date)?;
            let input = LeaveInput {
                user_id: actor.id.clone(),
                start_date: start,
                end_date: end,
                working_days: *working_days,
                reason: Some(reason.clone()),
            };
            let r = WorkflowLogic::request_sick_leave(&mut pool, &input, now)?;
            emit(ctx.json, &r, render::request_created)
        }
        Commands::VacationStatus => {
            let balance = BalanceLogic::require(&mut pool, &actor.id)?;
            let recent = WorkflowLogic::recent_requests(&mut pool, &actor.id, ctx.cfg.recent_requests)?;
            let status = VacationStatus {
                available_days: balance.available_days(),
                balance,
                recent,
            };
            emit(ctx.json, &status, render::vacation_status)
        }
        Commands::TimeLog { days } => {
            let entries = LedgerLogic::history(&mut pool, &actor.id, *days, now)?;
            emit(ctx.json, &entries, render::time_log)
        }
        _ => Ok(()),
    }
}
