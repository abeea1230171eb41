//! # ciq-vectors
//!
//! Keyword vector sources for ClusterIQ.
//!
//! The grouping engine only needs one fixed-length vector per keyword and a
//! consistent distance metric. Where those vectors come from is pluggable:
//!
//! - [`EmbeddingSource`]: dense sentence embeddings from a local fastembed
//!   (ONNX runtime) model. The model is loaded on the first call to
//!   [`VectorSource::embed`], not at construction.
//! - [`NgramSource`]: hashed character n-gram term frequencies. Deterministic
//!   and model-free.
//! - [`StaticSource`]: a fixed keyword → vector table, for tests and for
//!   vectors computed elsewhere.
//!
//! ## Async usage
//!
//! Every source is synchronous. From async code, move the source into
//! [`tokio::task::spawn_blocking`].

pub mod embedding;
pub mod error;
pub mod fixed;
pub mod ngram;

pub use embedding::{EmbeddingModelName, EmbeddingSource};
pub use error::VectorError;
pub use fixed::StaticSource;
pub use ngram::NgramSource;

use ciq_config::{VectorBackend, VectorsConfig};

/// Produces one vector per keyword.
///
/// Implementations must return exactly `texts.len()` vectors, in order, all of
/// the same length.
pub trait VectorSource: Send {
    /// Short backend name for logs and summaries.
    fn name(&self) -> &str;

    /// Embed a batch of keywords.
    ///
    /// # Errors
    ///
    /// Backend-specific; see [`VectorError`].
    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError>;
}

/// Build the source selected by `config.backend`.
///
/// # Errors
///
/// Returns [`VectorError::UnknownModel`] if the embedding backend is selected
/// with a model name that is not supported.
pub fn from_config(config: &VectorsConfig) -> Result<Box<dyn VectorSource>, VectorError> {
    match config.backend {
        VectorBackend::Embedding => Ok(Box::new(EmbeddingSource::from_config(config)?)),
        VectorBackend::Ngram => Ok(Box::new(NgramSource::new(
            config.ngram_min..=config.ngram_max,
            config.ngram_dimensions,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngram_backend_from_config() {
        let config = VectorsConfig {
            backend: VectorBackend::Ngram,
            ngram_dimensions: 64,
            ..VectorsConfig::default()
        };
        let mut source = from_config(&config).expect("source");
        assert_eq!(source.name(), "ngram");

        let vectors = source.embed(&["seo tools".to_string()]).expect("embed");
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].len(), 64);
    }

    #[test]
    fn unknown_model_is_rejected_before_loading() {
        let config = VectorsConfig {
            model: "word2vec".into(),
            ..VectorsConfig::default()
        };
        assert!(matches!(
            from_config(&config),
            Err(VectorError::UnknownModel(_))
        ));
    }
}
