//! Opportunity scoring configuration.

use ciq_core::{Intent, Strictness};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_transactional() -> f64 {
    1.5
}

const fn default_commercial() -> f64 {
    1.2
}

const fn default_informational() -> f64 {
    1.0
}

const fn default_navigational() -> f64 {
    0.8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// How malformed volume/difficulty cells are handled.
    #[serde(default)]
    pub strictness: Strictness,

    #[serde(default = "default_transactional")]
    pub transactional: f64,

    #[serde(default = "default_commercial")]
    pub commercial: f64,

    /// Also applied to missing or unrecognised intents.
    #[serde(default = "default_informational")]
    pub informational: f64,

    #[serde(default = "default_navigational")]
    pub navigational: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            transactional: default_transactional(),
            commercial: default_commercial(),
            informational: default_informational(),
            navigational: default_navigational(),
        }
    }
}

impl ScoringConfig {
    /// Configured weight for an intent.
    #[must_use]
    pub const fn weight(&self, intent: Intent) -> f64 {
        match intent {
            Intent::Transactional => self.transactional,
            Intent::Commercial => self.commercial,
            Intent::Informational => self.informational,
            Intent::Navigational => self.navigational,
        }
    }

    /// Every weight must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for intent in Intent::ALL {
            let weight = self.weight(intent);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("scoring.{intent}"),
                    reason: format!("weight must be a non-negative number, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_intent_table() {
        let config = ScoringConfig::default();
        assert_eq!(config.strictness, Strictness::Lenient);
        assert!((config.weight(Intent::Transactional) - 1.5).abs() < f64::EPSILON);
        assert!((config.weight(Intent::Commercial) - 1.2).abs() < f64::EPSILON);
        assert!((config.weight(Intent::Informational) - 1.0).abs() < f64::EPSILON);
        assert!((config.weight(Intent::Navigational) - 0.8).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let config = ScoringConfig {
            navigational: -0.1,
            ..ScoringConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoring.navigational"));
    }
}
