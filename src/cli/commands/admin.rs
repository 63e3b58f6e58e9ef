use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::balance::BalanceLogic;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::balance::BalanceOp;
use crate::ui::render::{self, emit};

/// Handle admin-set-balance / admin-add-days / admin-remove-days
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let (op, target, days, target_name) = match cmd {
        Commands::AdminSetBalance {
            target,
            days,
            target_name,
        } => (BalanceOp::Set, target, *days, target_name),
        Commands::AdminAddDays {
            target,
            days,
            target_name,
        } => (BalanceOp::Add, target, *days, target_name),
        Commands::AdminRemoveDays {
            target,
            days,
            target_name,
        } => (BalanceOp::Remove, target, *days, target_name),
        _ => return Ok(()),
    };

    let (mut pool, actor) = ctx.open_as_actor()?;
    UserLogic::ensure_target(&pool.conn, target, target_name.as_deref())?;

    let r = BalanceLogic::adjust(&mut pool, &actor.id, target, op, days, ctx.now)?;
    emit(ctx.json, &r, render::balance_adjusted)
}
