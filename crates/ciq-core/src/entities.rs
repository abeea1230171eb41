//! Keyword and link records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Intent, Strictness};
use crate::errors::CoreError;
use crate::metrics::parse_metric;

/// Column names used when reporting coercion errors.
pub const VOLUME_COLUMN: &str = "Volume";
pub const DIFFICULTY_COLUMN: &str = "Keyword Difficulty";

/// Cells exactly as they appeared in the input, echoed back in the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RawFields {
    pub volume: Option<String>,
    pub difficulty: Option<String>,
    pub intent: Option<String>,
}

/// One input keyword with its search metadata.
///
/// Identity is the keyword text. Uniqueness is assumed, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeywordRecord {
    pub keyword: String,
    /// Monthly search volume, `>= 0`.
    pub volume: f64,
    /// Ranking difficulty, `>= 0`.
    pub difficulty: f64,
    pub intent: Intent,
    pub raw: RawFields,
}

impl KeywordRecord {
    /// Build a record from already-typed values.
    ///
    /// Negative numbers clamp to `0`. The raw fields are filled from the typed
    /// values so reports echo something sensible.
    #[must_use]
    pub fn new(keyword: impl Into<String>, volume: f64, difficulty: f64, intent: Intent) -> Self {
        let volume = volume.max(0.0);
        let difficulty = difficulty.max(0.0);
        Self {
            keyword: keyword.into(),
            volume,
            difficulty,
            intent,
            raw: RawFields {
                volume: Some(volume.to_string()),
                difficulty: Some(difficulty.to_string()),
                intent: Some(intent.as_str().to_string()),
            },
        }
    }

    /// Build a record from raw input cells.
    ///
    /// `row` is the 1-based data row used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidNumber`] for malformed volume or difficulty
    /// cells when `strictness` is [`Strictness::Strict`].
    pub fn from_raw(
        keyword: impl Into<String>,
        raw: RawFields,
        strictness: Strictness,
        row: usize,
    ) -> Result<Self, CoreError> {
        let volume = parse_metric(raw.volume.as_deref(), strictness, VOLUME_COLUMN, row)?;
        let difficulty =
            parse_metric(raw.difficulty.as_deref(), strictness, DIFFICULTY_COLUMN, row)?;
        let intent = raw
            .intent
            .as_deref()
            .map(Intent::parse_lenient)
            .unwrap_or_default();

        Ok(Self {
            keyword: keyword.into(),
            volume,
            difficulty,
            intent,
            raw,
        })
    }

    /// Keyword length in Unicode scalar values, the unit used for pillar selection.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.keyword.chars().count()
    }
}

/// Suggested URL and internal link for one keyword.
///
/// `link_target_url` and `anchor_text` are `None` for pillars.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkRecord {
    pub suggested_url: String,
    pub link_target_url: Option<String>,
    pub anchor_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_raw_coerces_and_keeps_raw_cells() {
        let raw = RawFields {
            volume: Some("abc".into()),
            difficulty: Some("12".into()),
            intent: Some(" Transactional ".into()),
        };
        let record = KeywordRecord::from_raw("buy shoes", raw.clone(), Strictness::Lenient, 1)
            .expect("lenient parse");

        assert!(record.volume.abs() < f64::EPSILON);
        assert!((record.difficulty - 12.0).abs() < f64::EPSILON);
        assert_eq!(record.intent, Intent::Transactional);
        assert_eq!(record.raw, raw);
    }

    #[test]
    fn from_raw_missing_intent_is_informational() {
        let record =
            KeywordRecord::from_raw("shoes", RawFields::default(), Strictness::Strict, 3).unwrap();
        assert_eq!(record.intent, Intent::Informational);
        assert!(record.volume.abs() < f64::EPSILON);
    }

    #[test]
    fn from_raw_strict_reports_difficulty_column() {
        let raw = RawFields {
            difficulty: Some("hard".into()),
            ..RawFields::default()
        };
        let err = KeywordRecord::from_raw("shoes", raw, Strictness::Strict, 4).unwrap_err();
        assert!(err.to_string().contains("Keyword Difficulty"));
    }

    #[test]
    fn char_len_counts_scalars_not_bytes() {
        let record = KeywordRecord::new("áo dài", 0.0, 0.0, Intent::Informational);
        assert_eq!(record.char_len(), 6);
    }

    #[test]
    fn new_clamps_negative_numbers() {
        let record = KeywordRecord::new("x", -5.0, -1.0, Intent::Commercial);
        assert!(record.volume.abs() < f64::EPSILON);
        assert!(record.difficulty.abs() < f64::EPSILON);
        assert_eq!(record.raw.volume.as_deref(), Some("0"));
    }
}
