//! Dense sentence embeddings via fastembed (ONNX runtime).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ciq_config::VectorsConfig;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use tracing::{debug, info};

use crate::VectorSource;
use crate::error::VectorError;

/// Embedding models that can be selected by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingModelName {
    /// `sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2`, 384 dims.
    ParaphraseMultilingualMiniLmL12V2,
    /// `sentence-transformers/all-MiniLM-L6-v2`, 384 dims, English.
    AllMiniLmL6V2,
    /// `sentence-transformers/all-MiniLM-L12-v2`, 384 dims, English.
    AllMiniLmL12V2,
    /// `intfloat/multilingual-e5-small`, 384 dims.
    MultilingualE5Small,
    /// `BAAI/bge-small-en-v1.5`, 384 dims, English.
    BgeSmallEnV15,
}

impl EmbeddingModelName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParaphraseMultilingualMiniLmL12V2 => "paraphrase-multilingual-minilm-l12-v2",
            Self::AllMiniLmL6V2 => "all-minilm-l6-v2",
            Self::AllMiniLmL12V2 => "all-minilm-l12-v2",
            Self::MultilingualE5Small => "multilingual-e5-small",
            Self::BgeSmallEnV15 => "bge-small-en-v1.5",
        }
    }

    const fn model(self) -> EmbeddingModel {
        match self {
            Self::ParaphraseMultilingualMiniLmL12V2 => EmbeddingModel::ParaphraseMLMiniLML12V2,
            Self::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            Self::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
            Self::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
            Self::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
        }
    }
}

impl fmt::Display for EmbeddingModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingModelName {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        [
            Self::ParaphraseMultilingualMiniLmL12V2,
            Self::AllMiniLmL6V2,
            Self::AllMiniLmL12V2,
            Self::MultilingualE5Small,
            Self::BgeSmallEnV15,
        ]
        .into_iter()
        .find(|name| name.as_str() == normalized)
        .ok_or_else(|| VectorError::UnknownModel(s.to_string()))
    }
}

/// Embedding source backed by a fastembed model.
///
/// The model (tens of MB, downloaded on first use) is created lazily by the
/// first [`VectorSource::embed`] call and lives as long as this value.
///
/// # Thread safety
///
/// [`TextEmbedding::embed`] requires `&mut self`. Move the source into a
/// blocking task rather than sharing it.
pub struct EmbeddingSource {
    model_name: EmbeddingModelName,
    cache_dir: PathBuf,
    batch_size: usize,
    show_download_progress: bool,
    model: Option<TextEmbedding>,
}

impl EmbeddingSource {
    /// Describe a source without loading the model.
    #[must_use]
    pub const fn new(model_name: EmbeddingModelName, cache_dir: PathBuf, batch_size: usize) -> Self {
        Self {
            model_name,
            cache_dir,
            batch_size,
            show_download_progress: false,
            model: None,
        }
    }

    /// Build from configuration. Does not touch the network or disk.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::UnknownModel`] for unsupported model names.
    pub fn from_config(config: &VectorsConfig) -> Result<Self, VectorError> {
        let model_name = config.model.parse::<EmbeddingModelName>()?;
        Ok(Self::new(
            model_name,
            config.resolved_cache_dir(),
            config.batch_size.max(1),
        )
        .with_download_progress(config.show_download_progress))
    }

    /// Show the fastembed download progress bar when the model is fetched.
    #[must_use]
    pub const fn with_download_progress(mut self, show: bool) -> Self {
        self.show_download_progress = show;
        self
    }

    #[must_use]
    pub const fn model_name(&self) -> EmbeddingModelName {
        self.model_name
    }

    /// Whether the model has been loaded yet.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    fn engine(&mut self) -> Result<&mut TextEmbedding, VectorError> {
        let model = match self.model.take() {
            Some(model) => model,
            None => {
                info!(
                    model = %self.model_name,
                    cache_dir = %self.cache_dir.display(),
                    "loading embedding model"
                );
                TextEmbedding::try_new(
                    TextInitOptions::new(self.model_name.model())
                        .with_cache_dir(self.cache_dir.clone())
                        .with_show_download_progress(self.show_download_progress),
                )
                .map_err(|e| VectorError::InitFailed(e.to_string()))?
            }
        };
        Ok(self.model.insert(model))
    }
}

impl VectorSource for EmbeddingSource {
    fn name(&self) -> &str {
        self.model_name.as_str()
    }

    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.batch_size;
        let engine = self.engine()?;
        debug!(count = texts.len(), batch_size, "embedding keywords");

        let vectors = engine
            .embed(texts.to_vec(), Some(batch_size))
            .map_err(|e| VectorError::EmbedFailed(e.to_string()))?;

        if vectors.len() != texts.len() {
            return Err(VectorError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }
}
