//! # ciq-plan
//!
//! Turns a flat keyword list into a content plan for ClusterIQ.
//!
//! The pipeline runs in one synchronous pass:
//!
//! 1. **Grouping**: agglomerative clustering of keyword vectors, cut at a
//!    distance threshold ([`grouping`]).
//! 2. **Roles**: the shortest keyword of each cluster becomes its pillar;
//!    singleton clusters are dropped ([`roles`]).
//! 3. **Scoring**: `volume * intent weight / (difficulty + 1)` and a priority
//!    tier ([`scoring`]).
//! 4. **Links**: slugged URLs, with supporting pages linking to their pillar
//!    ([`links`]).
//! 5. **Report**: flat rows plus summary counts ([`report`]), optionally
//!    exported as a link graph ([`graph`]).
//!
//! [`ContentPlanner`] wires these together around an injected
//! [`ciq_vectors::VectorSource`].

pub mod error;
pub mod graph;
pub mod grouping;
pub mod links;
pub mod planner;
pub mod report;
pub mod roles;
pub mod scoring;

pub use error::PlanError;
pub use graph::{GraphAnalysis, GraphEdge, GraphExport, GraphNode, LinkGraph};
pub use grouping::{GroupingParams, Merge, dendrogram, group};
pub use links::{plan_link, slugify};
pub use planner::{ContentPlanner, PlannerOptions};
pub use report::{ContentPlan, ReportOptions, assemble};
pub use roles::{Cluster, RoleAssignment, assign_roles};
pub use scoring::{
    IntentWeights, Score, calculate_score, calculate_score_with, round_score, score_raw,
    score_record,
};
