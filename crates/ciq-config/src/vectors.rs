//! Vector source configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default sentence-embedding model, multilingual so accented keywords embed well.
pub const DEFAULT_MODEL: &str = "paraphrase-multilingual-minilm-l12-v2";

/// Which upstream producer turns keywords into vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorBackend {
    /// Dense sentence embeddings (fastembed / ONNX).
    #[default]
    Embedding,
    /// Hashed character n-gram term frequencies. No model download.
    Ngram,
}

impl VectorBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::Ngram => "ngram",
        }
    }
}

impl fmt::Display for VectorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VectorBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "embedding" => Ok(Self::Embedding),
            "ngram" => Ok(Self::Ngram),
            _ => Err(ConfigError::InvalidValue {
                field: "vectors.backend".into(),
                reason: format!("expected 'embedding' or 'ngram', got '{s}'"),
            }),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_show_download_progress() -> bool {
    true
}

const fn default_batch_size() -> usize {
    256
}

const fn default_ngram_min() -> usize {
    2
}

const fn default_ngram_max() -> usize {
    4
}

const fn default_ngram_dimensions() -> usize {
    4096
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VectorsConfig {
    #[serde(default)]
    pub backend: VectorBackend,

    /// Embedding model name (see `ciq-vectors` for the accepted names).
    ///
    /// fastembed returns L2-normalised vectors, so euclidean distances stay
    /// within `0..=2`. The default `clustering.threshold` of 1.2 is generous at
    /// that scale and merges broadly; values around 0.6 to 0.9 give tighter
    /// topics on unit vectors.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model cache directory. Empty means `<cache_dir>/clusteriq/fastembed`.
    #[serde(default)]
    pub cache_dir: String,

    /// Show a progress bar while the model downloads.
    #[serde(default = "default_show_download_progress")]
    pub show_download_progress: bool,

    /// Keywords per embedding call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,

    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,

    /// Length of hashed n-gram vectors.
    #[serde(default = "default_ngram_dimensions")]
    pub ngram_dimensions: usize,
}

impl Default for VectorsConfig {
    fn default() -> Self {
        Self {
            backend: VectorBackend::default(),
            model: default_model(),
            cache_dir: String::new(),
            show_download_progress: default_show_download_progress(),
            batch_size: default_batch_size(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
            ngram_dimensions: default_ngram_dimensions(),
        }
    }
}

impl VectorsConfig {
    /// Resolved model cache directory.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        if !self.cache_dir.is_empty() {
            return PathBuf::from(&self.cache_dir);
        }
        dirs::cache_dir().map_or_else(
            || PathBuf::from(".fastembed_cache"),
            |dir| dir.join("clusteriq").join("fastembed"),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(invalid("vectors.batch_size", "must be at least 1"));
        }
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(invalid(
                "vectors.ngram_min",
                &format!(
                    "must satisfy 1 <= ngram_min <= ngram_max, got {}..={}",
                    self.ngram_min, self.ngram_max
                ),
            ));
        }
        if self.ngram_dimensions == 0 {
            return Err(invalid("vectors.ngram_dimensions", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
