//! Planning error types.

use ciq_core::{DistanceMetric, Linkage};

/// Errors from grouping, role assignment, and plan assembly.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Error from the vector source.
    #[error("vector source error: {0}")]
    Vector(#[from] ciq_vectors::VectorError),

    /// Error from record parsing or validation.
    #[error(transparent)]
    Core(#[from] ciq_core::CoreError),

    /// Linkage threshold is not a positive finite number.
    #[error("invalid distance threshold: {0}")]
    InvalidThreshold(f64),

    /// Linkage criterion cannot be used with this metric.
    #[error("{linkage} linkage cannot be used with {metric} distance")]
    IncompatibleLinkage {
        linkage: Linkage,
        metric: DistanceMetric,
    },

    /// Vectors do not all have the same length.
    #[error("vector {index} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A vector contains `NaN` or an infinity.
    #[error("vector {index} contains a non-finite value")]
    NonFiniteVector { index: usize },

    /// Two parallel inputs (records, vectors, labels) differ in length.
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
