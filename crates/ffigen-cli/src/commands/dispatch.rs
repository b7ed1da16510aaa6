use ffigen_config::FfigenConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &FfigenConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Extract(args) => commands::extract::handle(args, config, flags),
        Commands::Schema(args) => commands::schema::handle(args, config, flags),
        Commands::Check(args) => commands::check::handle(args, config, flags),
    }
}
