use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut pool = ctx.open()?;
        LogLogic::print_log(&mut pool)?;
    }

    Ok(())
}
