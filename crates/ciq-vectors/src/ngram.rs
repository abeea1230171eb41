//! Hashed character n-gram term-frequency vectors.
//!
//! Each keyword is lower-cased, padded with one space on both sides, and split
//! into character n-grams for every `n` in the configured range. Each n-gram
//! is hashed (FNV-1a, 64-bit) into one of `dimensions` buckets and counted.
//! The count vector is L2-normalised, so Euclidean distances fall in `[0, 2]`.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::VectorSource;
use crate::error::VectorError;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Deterministic, model-free vector source.
#[derive(Debug, Clone)]
pub struct NgramSource {
    min_n: usize,
    max_n: usize,
    dimensions: usize,
}

impl NgramSource {
    /// `range` is clamped to start at 1; `dimensions` to at least 1.
    #[must_use]
    pub fn new(range: RangeInclusive<usize>, dimensions: usize) -> Self {
        let min_n = (*range.start()).max(1);
        Self {
            min_n,
            max_n: (*range.end()).max(min_n),
            dimensions: dimensions.max(1),
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Vector for a single keyword.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let padded: Vec<char> = format!(" {} ", text.trim().to_lowercase()).chars().collect();
        let mut counts = vec![0.0_f32; self.dimensions];

        for n in self.min_n..=self.max_n {
            for gram in padded.windows(n) {
                let bucket = fnv1a(gram) % self.dimensions as u64;
                #[allow(clippy::cast_possible_truncation)]
                let bucket = bucket as usize;
                counts[bucket] += 1.0;
            }
        }

        let norm = counts.iter().map(|c| c * c).sum::<f32>().sqrt();
        if norm > 0.0 {
            for c in &mut counts {
                *c /= norm;
            }
        }
        counts
    }
}

impl Default for NgramSource {
    fn default() -> Self {
        Self::new(2..=4, 4096)
    }
}

impl VectorSource for NgramSource {
    fn name(&self) -> &str {
        "ngram"
    }

    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError> {
        debug!(
            count = texts.len(),
            dimensions = self.dimensions,
            "vectorizing keywords with character n-grams"
        );
        Ok(texts.iter().map(|text| self.vectorize(text)).collect())
    }
}

fn fnv1a(chars: &[char]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut buf = [0_u8; 4];
    for ch in chars {
        for byte in ch.encode_utf8(&mut buf).as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f32>()
            .sqrt()
    }

    #[test]
    fn vectors_are_unit_length() {
        let source = NgramSource::default();
        let v = source.vectorize("best running shoes");
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(v.len(), 4096);
    }

    #[test]
    fn case_and_outer_whitespace_do_not_matter() {
        let source = NgramSource::default();
        assert_eq!(
            source.vectorize("Running Shoes"),
            source.vectorize("  running shoes ")
        );
    }

    #[test]
    fn overlapping_keywords_are_closer() {
        let source = NgramSource::default();
        let shoes = source.vectorize("running shoes");
        let more_shoes = source.vectorize("best running shoes");
        let cake = source.vectorize("chocolate cake");
        assert!(distance(&shoes, &more_shoes) < distance(&shoes, &cake));
    }

    #[test]
    fn deterministic_across_instances() {
        let mut a = NgramSource::new(2..=3, 128);
        let mut b = NgramSource::new(2..=3, 128);
        let texts = vec!["áo dài".to_string(), "seo audit".to_string()];
        assert_eq!(a.embed(&texts).unwrap(), b.embed(&texts).unwrap());
    }

    #[test]
    fn empty_text_still_has_fixed_length() {
        let source = NgramSource::new(2..=4, 32);
        let v = source.vectorize("");
        assert_eq!(v.len(), 32);
    }

    #[test]
    fn degenerate_range_is_clamped() {
        let source = NgramSource::new(0..=0, 0);
        assert_eq!(source.dimensions(), 1);
        assert_eq!(source.vectorize("ab").len(), 1);
    }
}
