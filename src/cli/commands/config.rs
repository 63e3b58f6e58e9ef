use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    if let Commands::Config { print_config: true } = cmd {
        let yaml = serde_yaml::to_string(ctx.cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{yaml}");
    }
    Ok(())
}
