//! Coercion of volume and difficulty cells into non-negative numbers.
//!
//! Missing cells are always `0`. Malformed cells are `0` under
//! [`Strictness::Lenient`] and an error under [`Strictness::Strict`].
//! Negative values clamp to `0`.

use crate::enums::Strictness;
use crate::errors::CoreError;

/// Outcome of coercing one raw cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Cell was absent or blank.
    Missing,
    /// Cell parsed to a finite number (already clamped to `>= 0`).
    Parsed(f64),
    /// Cell was present but not a finite number.
    Malformed,
}

impl Coerced {
    /// Numeric value after applying the default-to-zero policy.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Parsed(v) => v,
            Self::Missing | Self::Malformed => 0.0,
        }
    }
}

/// Classify a raw cell without applying any strictness policy.
#[must_use]
pub fn coerce(raw: Option<&str>) -> Coerced {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Coerced::Missing;
    };

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Parsed(v.max(0.0)),
        _ => Coerced::Malformed,
    }
}

/// Parse a volume or difficulty cell under the given strictness.
///
/// # Errors
///
/// Returns [`CoreError::InvalidNumber`] when `strictness` is
/// [`Strictness::Strict`] and the cell is present but not a finite number.
pub fn parse_metric(
    raw: Option<&str>,
    strictness: Strictness,
    column: &str,
    row: usize,
) -> Result<f64, CoreError> {
    match (coerce(raw), strictness) {
        (Coerced::Malformed, Strictness::Strict) => Err(CoreError::InvalidNumber {
            column: column.to_string(),
            row,
            value: raw.unwrap_or_default().to_string(),
        }),
        (coerced, _) => Ok(coerced.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(""), 0.0)]
    #[case(Some("   "), 0.0)]
    #[case(Some("1200"), 1200.0)]
    #[case(Some(" 35.5 "), 35.5)]
    #[case(Some("1e3"), 1000.0)]
    #[case(Some("-4"), 0.0)]
    #[case(Some("n/a"), 0.0)]
    #[case(Some("1,200"), 0.0)]
    #[case(Some("NaN"), 0.0)]
    #[case(Some("inf"), 0.0)]
    fn lenient_coercion(#[case] raw: Option<&str>, #[case] expected: f64) {
        let value = parse_metric(raw, Strictness::Lenient, "Volume", 1).unwrap();
        assert!((value - expected).abs() < f64::EPSILON, "{raw:?} -> {value}");
    }

    #[test]
    fn strict_rejects_malformed_values() {
        let err = parse_metric(Some("lots"), Strictness::Strict, "Volume", 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid number in column 'Volume' at row 7: 'lots'"
        );
    }

    #[test]
    fn strict_still_defaults_missing_values() {
        let value = parse_metric(None, Strictness::Strict, "Keyword Difficulty", 2).unwrap();
        assert!(value.abs() < f64::EPSILON);
    }

    #[test]
    fn coerce_reports_malformed() {
        assert_eq!(coerce(Some("abc")), Coerced::Malformed);
        assert_eq!(coerce(Some("12")), Coerced::Parsed(12.0));
        assert_eq!(coerce(None), Coerced::Missing);
    }
}
