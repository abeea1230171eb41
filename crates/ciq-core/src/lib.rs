//! # ciq-core
//!
//! Core types and error types for ClusterIQ.
//!
//! This crate provides the foundational types shared across all ClusterIQ crates:
//! - Keyword records with their search metadata
//! - Intent, role, priority tier, and clustering enums
//! - Numeric coercion policy for volume/difficulty cells
//! - Flattened report rows and plan summaries
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod metrics;
pub mod responses;

pub use entities::{KeywordRecord, LinkRecord, RawFields};
pub use enums::{DistanceMetric, Intent, Linkage, PriorityTier, Role, Strictness};
pub use errors::CoreError;
pub use responses::{PlanRow, PlanSummary, TierCounts};
