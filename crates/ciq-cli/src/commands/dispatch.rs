use ciq_config::ClusterIqConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: ClusterIqConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Plan(args) => commands::plan::handle(&args, config, flags).await,
        Commands::Score(args) => commands::score::handle(&args, &config, flags),
        Commands::Config => commands::config::handle(&config, flags),
        Commands::Slug(_) | Commands::Schema(_) => {
            unreachable!("slug/schema are pre-dispatched in main")
        }
    }
}
