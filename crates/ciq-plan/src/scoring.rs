//! Opportunity scoring.
//!
//! ```text
//! score = (volume * intent_weight) / (difficulty + 1)
//! ```
//!
//! Inputs are clamped to `>= 0`, so the denominator is never below one.

use ciq_config::ScoringConfig;
use ciq_core::entities::{DIFFICULTY_COLUMN, VOLUME_COLUMN};
use ciq_core::metrics::parse_metric;
use ciq_core::{Intent, KeywordRecord, PriorityTier, Strictness};
use serde::Serialize;
use tracing::debug;

use crate::error::PlanError;

/// Multiplier applied to volume per search intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentWeights {
    pub transactional: f64,
    pub commercial: f64,
    pub informational: f64,
    pub navigational: f64,
}

impl Default for IntentWeights {
    fn default() -> Self {
        Self {
            transactional: 1.5,
            commercial: 1.2,
            informational: 1.0,
            navigational: 0.8,
        }
    }
}

impl From<&ScoringConfig> for IntentWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            transactional: config.transactional,
            commercial: config.commercial,
            informational: config.informational,
            navigational: config.navigational,
        }
    }
}

impl IntentWeights {
    #[must_use]
    pub const fn weight(&self, intent: Intent) -> f64 {
        match intent {
            Intent::Transactional => self.transactional,
            Intent::Commercial => self.commercial,
            Intent::Informational => self.informational,
            Intent::Navigational => self.navigational,
        }
    }
}

/// Score with the default intent weights.
#[must_use]
pub fn calculate_score(volume: f64, difficulty: f64, intent: Intent) -> f64 {
    calculate_score_with(volume, difficulty, intent, &IntentWeights::default())
}

#[must_use]
pub fn calculate_score_with(
    volume: f64,
    difficulty: f64,
    intent: Intent,
    weights: &IntentWeights,
) -> f64 {
    let volume = volume.max(0.0);
    let difficulty = difficulty.max(0.0);
    (volume * weights.weight(intent)) / (difficulty + 1.0)
}

/// Round to one decimal from the exact binary value, exact ties to even.
///
/// Scaling by ten first would drift: `0.35` is stored just below the tie and
/// must round down.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    format!("{score:.1}").parse().unwrap_or(score)
}

/// A record's score and the tier derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Unrounded score; the tier is derived from this value.
    pub value: f64,
    pub tier: PriorityTier,
}

impl Score {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tier: PriorityTier::from_score(value),
        }
    }

    #[must_use]
    pub fn rounded(&self) -> f64 {
        round_score(self.value)
    }
}

#[must_use]
pub fn score_record(record: &KeywordRecord, weights: &IntentWeights) -> Score {
    if record
        .raw
        .intent
        .as_deref()
        .is_some_and(|raw| Intent::recognize(raw).is_none())
    {
        debug!(keyword = %record.keyword, "unrecognised intent, using informational weight");
    }
    Score::new(calculate_score_with(
        record.volume,
        record.difficulty,
        record.intent,
        weights,
    ))
}

/// Score loose text cells, as typed on the command line.
///
/// # Errors
///
/// Returns [`PlanError::Core`] for malformed numbers under [`Strictness::Strict`].
pub fn score_raw(
    volume: Option<&str>,
    difficulty: Option<&str>,
    intent: Option<&str>,
    strictness: Strictness,
    weights: &IntentWeights,
) -> Result<Score, PlanError> {
    let volume = parse_metric(volume, strictness, VOLUME_COLUMN, 1)?;
    let difficulty = parse_metric(difficulty, strictness, DIFFICULTY_COLUMN, 1)?;
    let intent = intent.map(Intent::parse_lenient).unwrap_or_default();
    Ok(Score::new(calculate_score_with(
        volume, difficulty, intent, weights,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[rstest]
    #[case(0.0, 0.0, Intent::Transactional, 0.0, PriorityTier::Deprioritized)]
    #[case(100.0, 9.0, Intent::Informational, 10.0, PriorityTier::Deprioritized)]
    #[case(1000.0, 9.0, Intent::Transactional, 150.0, PriorityTier::Highest)]
    #[case(1000.0, 19.0, Intent::Commercial, 60.0, PriorityTier::High)]
    #[case(500.0, 9.0, Intent::Navigational, 40.0, PriorityTier::Low)]
    fn known_scores(
        #[case] volume: f64,
        #[case] difficulty: f64,
        #[case] intent: Intent,
        #[case] expected: f64,
        #[case] tier: PriorityTier,
    ) {
        let score = calculate_score(volume, difficulty, intent);
        assert!(close(score, expected), "{score} != {expected}");
        assert_eq!(PriorityTier::from_score(score), tier);
    }

    #[test]
    fn score_is_monotone_in_volume_and_difficulty() {
        for intent in Intent::ALL {
            let mut previous = f64::NEG_INFINITY;
            for volume in [0.0, 1.0, 10.0, 250.0, 10_000.0] {
                let score = calculate_score(volume, 5.0, intent);
                assert!(score >= previous);
                previous = score;
            }

            let mut previous = f64::INFINITY;
            for difficulty in [0.0, 1.0, 10.0, 50.0, 100.0] {
                let score = calculate_score(800.0, difficulty, intent);
                assert!(score <= previous);
                previous = score;
            }
        }
    }

    #[test]
    fn negative_inputs_clamp_to_zero() {
        assert!(close(calculate_score(-50.0, 0.0, Intent::Commercial), 0.0));
        assert!(close(calculate_score(10.0, -3.0, Intent::Informational), 10.0));
    }

    #[rstest]
    #[case(12.34, 12.3)]
    #[case(12.25, 12.2)]
    #[case(0.75, 0.8)]
    #[case(0.35, 0.3)]
    #[case(1.45, 1.4)]
    #[case(66.666_666, 66.7)]
    fn rounding_to_one_decimal(#[case] raw: f64, #[case] expected: f64) {
        assert!(close(round_score(raw), expected));
    }

    #[rstest]
    #[case(7.0, 0.3)]
    #[case(29.0, 1.4)]
    fn computed_scores_below_a_tie_round_down(#[case] volume: f64, #[case] expected: f64) {
        let score = Score::new(calculate_score(volume, 19.0, Intent::Informational));
        assert!(close(score.rounded(), expected));
    }

    #[test]
    fn custom_weights_apply() {
        let weights = IntentWeights {
            transactional: 3.0,
            ..IntentWeights::default()
        };
        let score = calculate_score_with(100.0, 0.0, Intent::Transactional, &weights);
        assert!(close(score, 300.0));
    }

    #[test]
    fn weights_follow_config() {
        let config = ScoringConfig {
            navigational: 0.5,
            ..ScoringConfig::default()
        };
        let weights = IntentWeights::from(&config);
        assert!(close(weights.weight(Intent::Navigational), 0.5));
        assert!(close(weights.weight(Intent::Commercial), 1.2));
    }

    #[test]
    fn raw_cells_are_coerced_leniently() {
        let score = score_raw(
            Some("1000"),
            Some("abc"),
            Some("TRANSACTIONAL"),
            Strictness::Lenient,
            &IntentWeights::default(),
        )
        .unwrap();
        assert!(close(score.value, 1500.0));
        assert_eq!(score.tier, PriorityTier::Highest);
    }

    #[test]
    fn raw_cells_fail_under_strict() {
        let err = score_raw(
            Some("1,200"),
            None,
            None,
            Strictness::Strict,
            &IntentWeights::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::Core(_)));
    }

    #[test]
    fn unknown_intent_scores_like_informational() {
        let weights = IntentWeights::default();
        let unknown = score_raw(Some("300"), Some("2"), Some("local"), Strictness::Lenient, &weights)
            .unwrap();
        let informational = score_raw(Some("300"), Some("2"), None, Strictness::Lenient, &weights)
            .unwrap();
        assert_eq!(unknown, informational);
    }
}
