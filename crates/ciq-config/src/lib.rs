//! # ciq-config
//!
//! Layered configuration loading for ClusterIQ using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CLUSTERIQ_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.clusteriq/config.toml`
//! 4. User-level `~/.config/clusteriq/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CLUSTERIQ_CLUSTERING__THRESHOLD` -> `clustering.threshold`,
//! `CLUSTERIQ_VECTORS__BACKEND` -> `vectors.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ciq_config::ClusterIqConfig;
//!
//! let config = ClusterIqConfig::load().expect("config");
//! println!("threshold: {}", config.clustering.threshold);
//! ```

mod clustering;
mod error;
mod output;
mod scoring;
mod vectors;

pub use clustering::{ClusteringConfig, DEFAULT_THRESHOLD};
pub use error::ConfigError;
pub use output::OutputConfig;
pub use scoring::ScoringConfig;
pub use vectors::{DEFAULT_MODEL, VectorBackend, VectorsConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CLUSTERIQ_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".clusteriq/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClusterIqConfig {
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub vectors: VectorsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ClusterIqConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; the binary loads them before calling in.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `explicit` above the discovered TOML files.
    ///
    /// The result is validated before it is returned.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingFile {
                    path: path.display().to_string(),
                });
            }
        }

        let config: Self = Self::figment_with(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the default figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the provider chain with an optional explicit file layer.
    pub fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clustering.validate()?;
        self.scoring.validate()?;
        self.vectors.validate()?;
        self.output.delimiter_byte()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clusteriq").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClusterIqConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.output.link_planning);
        assert_eq!(config.vectors.backend, VectorBackend::Embedding);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: ClusterIqConfig = ClusterIqConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert!((config.clustering.threshold - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ClusterIqConfig::load_from(Some(Path::new("/definitely/not/here.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }
}
