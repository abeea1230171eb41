//! Grouping engine configuration.

use ciq_core::{DistanceMetric, Linkage};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default linkage distance threshold.
pub const DEFAULT_THRESHOLD: f64 = 1.2;

const fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusteringConfig {
    /// Merges at or above this linkage distance are not applied.
    ///
    /// The scale depends on the vectors: embedding and n-gram vectors are
    /// unit length, so 1.2 merges loosely there. Lower it for tighter topics.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Inter-cluster distance criterion.
    #[serde(default)]
    pub linkage: Linkage,

    /// Pairwise vector distance.
    #[serde(default)]
    pub metric: DistanceMetric,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            linkage: Linkage::default(),
            metric: DistanceMetric::default(),
        }
    }
}

impl ClusteringConfig {
    /// Check threshold range and linkage/metric compatibility.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "clustering.threshold".into(),
                reason: format!("must be a positive number, got {}", self.threshold),
            });
        }
        if self.linkage == Linkage::Ward && self.metric != DistanceMetric::Euclidean {
            return Err(ConfigError::InvalidValue {
                field: "clustering.metric".into(),
                reason: format!("ward linkage requires euclidean distance, got {}", self.metric),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ClusteringConfig::default();
        assert!((config.threshold - 1.2).abs() < f64::EPSILON);
        assert_eq!(config.linkage, Linkage::Ward);
        assert_eq!(config.metric, DistanceMetric::Euclidean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ward_with_cosine_is_rejected() {
        let config = ClusteringConfig {
            metric: DistanceMetric::Cosine,
            ..ClusteringConfig::default()
        };
        assert!(config.validate().is_err());

        let average = ClusteringConfig {
            linkage: Linkage::Average,
            metric: DistanceMetric::Cosine,
            ..ClusteringConfig::default()
        };
        assert!(average.validate().is_ok());
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        for threshold in [0.0, -1.0, f64::NAN] {
            let config = ClusteringConfig {
                threshold,
                ..ClusteringConfig::default()
            };
            assert!(config.validate().is_err(), "threshold {threshold}");
        }
    }
}
