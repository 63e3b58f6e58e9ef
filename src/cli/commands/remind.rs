use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::remind::RemindLogic;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::ui::render::{self, emit};

pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    if let Commands::Remind {
        target,
        message,
        minutes,
    } = cmd
    {
        let (mut pool, actor) = ctx.open_as_actor()?;
        UserLogic::ensure_target(&pool.conn, target, None)?;
        let r = RemindLogic::record(&mut pool, actor, target, message, *minutes, ctx.now)?;
        emit(ctx.json, &r, render::reminder)?;
    }
    Ok(())
}
