//! Vector source error types.

/// Errors that can occur while turning keywords into vectors.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    /// Model initialization failed (download, ONNX runtime, cache issues).
    #[error("Model initialization failed: {0}")]
    InitFailed(String),

    /// Embedding generation failed (inference error, invalid input).
    #[error("Embedding generation failed: {0}")]
    EmbedFailed(String),

    /// The configured model name is not one we know how to load.
    #[error("Unknown embedding model '{0}'")]
    UnknownModel(String),

    /// The source returned a different number of vectors than texts.
    #[error("Vector source returned {actual} vectors for {expected} keywords")]
    CountMismatch { expected: usize, actual: usize },

    /// A fixed source has no vector for this keyword.
    #[error("No vector available for keyword '{0}'")]
    MissingVector(String),
}
