use ciq_config::ClusterIqConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `ciq config`: print the merged configuration.
pub fn handle(config: &ClusterIqConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
