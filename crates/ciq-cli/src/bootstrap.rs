use anyhow::Context;
use ciq_config::ClusterIqConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ClusterIqConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    ClusterIqConfig::load_from(flags.config.as_deref()).context("failed to load configuration")
}
