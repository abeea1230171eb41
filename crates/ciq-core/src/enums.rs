//! Intent, role, priority tier, and coercion enums for ClusterIQ.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Human-facing report labels are exposed separately through `label()`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Search intent of a keyword.
///
/// Parsed case-insensitively after trimming. Anything unrecognised is weighted
/// like [`Intent::Informational`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Transactional,
    Commercial,
    #[default]
    Informational,
    Navigational,
}

impl Intent {
    pub const ALL: [Self; 4] = [
        Self::Transactional,
        Self::Commercial,
        Self::Informational,
        Self::Navigational,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transactional => "transactional",
            Self::Commercial => "commercial",
            Self::Informational => "informational",
            Self::Navigational => "navigational",
        }
    }

    /// Parse an intent cell, returning `None` for empty or unknown values.
    #[must_use]
    pub fn recognize(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
    }

    /// Parse an intent cell, falling back to [`Intent::Informational`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or_default()
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| CoreError::UnknownVariant {
            kind: "intent",
            value: s.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of a keyword inside a topic cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The hub topic of the cluster. Exactly one per non-trivial cluster.
    Pillar,
    /// Content that links back to the pillar.
    Supporting,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pillar => "pillar",
            Self::Supporting => "supporting",
        }
    }

    /// Report label used in exported tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pillar => "Pillar Page",
            Self::Supporting => "Cluster Content",
        }
    }

    #[must_use]
    pub const fn is_pillar(self) -> bool {
        matches!(self, Self::Pillar)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PriorityTier
// ---------------------------------------------------------------------------

/// Discrete production priority derived from an opportunity score.
///
/// Ordered from most to least urgent, so `Highest < High < Low < Deprioritized`
/// under the derived `Ord`.
///
/// ```text
/// score > 100        → highest
/// 50 < score <= 100  → high
/// 20 < score <= 50   → low
/// score <= 20        → deprioritized
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Highest,
    High,
    Low,
    Deprioritized,
}

impl PriorityTier {
    pub const ALL: [Self; 4] = [Self::Highest, Self::High, Self::Low, Self::Deprioritized];

    /// Classify a score into its tier. `NaN` lands in [`PriorityTier::Deprioritized`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 100.0 {
            Self::Highest
        } else if score > 50.0 {
            Self::High
        } else if score > 20.0 {
            Self::Low
        } else {
            Self::Deprioritized
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Highest => "highest",
            Self::High => "high",
            Self::Low => "low",
            Self::Deprioritized => "deprioritized",
        }
    }

    /// Report label used in exported tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Highest => "highest priority",
            Self::High => "high priority",
            Self::Low => "low priority",
            Self::Deprioritized => "deprioritized",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Strictness
// ---------------------------------------------------------------------------

/// How malformed numeric cells are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Malformed values become `0` and the run continues.
    #[default]
    Lenient,
    /// Malformed values abort the run with [`CoreError::InvalidNumber`].
    Strict,
}

impl Strictness {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Linkage
// ---------------------------------------------------------------------------

/// Inter-cluster distance criterion for agglomerative grouping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Minimum variance increase. Requires [`DistanceMetric::Euclidean`].
    #[default]
    Ward,
    /// Maximum pairwise distance.
    Complete,
    /// Mean pairwise distance.
    Average,
    /// Minimum pairwise distance.
    Single,
}

impl Linkage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ward => "ward",
            Self::Complete => "complete",
            Self::Average => "average",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linkage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ward" => Ok(Self::Ward),
            "complete" => Ok(Self::Complete),
            "average" => Ok(Self::Average),
            "single" => Ok(Self::Single),
            _ => Err(CoreError::UnknownVariant {
                kind: "linkage",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DistanceMetric
// ---------------------------------------------------------------------------

/// Pairwise distance between keyword vectors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    /// `1 - cosine similarity`, in `[0, 2]`.
    Cosine,
}

impl DistanceMetric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Cosine => "cosine",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "cosine" => Ok(Self::Cosine),
            _ => Err(CoreError::UnknownVariant {
                kind: "distance metric",
                value: s.to_string(),
            }),
        }
    }
}
