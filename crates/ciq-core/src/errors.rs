//! Cross-cutting error types for ClusterIQ.
//!
//! Domain-specific errors (`VectorError`, `PlanError`) are defined in their
//! respective crates. They converge into `anyhow` in `ciq-cli`.

use thiserror::Error;

/// Errors that can be raised by any ClusterIQ crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A numeric cell could not be parsed and strict coercion is enabled.
    #[error("Invalid number in column '{column}' at row {row}: '{value}'")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// An enum value was not recognised.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
