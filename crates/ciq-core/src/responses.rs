//! Report types returned by the content planner and rendered by `ciq`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{PriorityTier, Role};

/// One row of the content plan report.
///
/// Only keywords in clusters of two or more members produce rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PlanRow {
    pub cluster_id: usize,
    pub role: Role,
    pub keyword: String,
    pub suggested_url: String,
    /// Empty for pillars.
    pub link_target_url: String,
    /// Empty for pillars.
    pub anchor_text: String,
    /// Input cells echoed verbatim (empty when the column was absent).
    pub intent: String,
    pub volume: String,
    pub difficulty: String,
    /// Opportunity score rounded to one decimal.
    pub score: f64,
    pub priority: PriorityTier,
}

impl PlanRow {
    /// Header line of the exported table.
    pub const HEADERS: [&'static str; 11] = [
        "Cluster ID",
        "Role",
        "Keyword",
        "Suggested URL",
        "Link Target URL",
        "Anchor Text",
        "Intent",
        "Volume",
        "Difficulty",
        "Score",
        "Priority",
    ];

    /// Cells of this row in [`Self::HEADERS`] order, using report labels.
    #[must_use]
    pub fn to_record(&self) -> [String; 11] {
        [
            self.cluster_id.to_string(),
            self.role.label().to_string(),
            self.keyword.clone(),
            self.suggested_url.clone(),
            self.link_target_url.clone(),
            self.anchor_text.clone(),
            self.intent.clone(),
            self.volume.clone(),
            self.difficulty.clone(),
            format!("{:.1}", self.score),
            self.priority.label().to_string(),
        ]
    }
}

/// Row count per priority tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TierCounts {
    pub highest: usize,
    pub high: usize,
    pub low: usize,
    pub deprioritized: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: PriorityTier) {
        match tier {
            PriorityTier::Highest => self.highest += 1,
            PriorityTier::High => self.high += 1,
            PriorityTier::Low => self.low += 1,
            PriorityTier::Deprioritized => self.deprioritized += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.highest + self.high + self.low + self.deprioritized
    }
}

/// Aggregate counts for one planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PlanSummary {
    /// Keywords fed to the grouping engine.
    pub keywords: usize,
    /// All clusters, including singletons.
    pub clusters: usize,
    /// Clusters with two or more members.
    pub content_clusters: usize,
    /// Singleton clusters dropped from the report.
    pub dropped_singletons: usize,
    pub rows: usize,
    pub pillars: usize,
    pub supporting: usize,
    pub tiers: TierCounts,
}
