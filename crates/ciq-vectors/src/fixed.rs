//! Fixed keyword → vector table.

use std::collections::HashMap;

use crate::VectorSource;
use crate::error::VectorError;

/// Looks keywords up in a precomputed table.
///
/// Useful for deterministic tests and for vectors produced outside ClusterIQ.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    vectors: HashMap<String, Vec<f32>>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the vector for `keyword`.
    #[must_use]
    pub fn with(mut self, keyword: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(keyword.into(), vector);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<f32>)> for StaticSource {
    fn from_iter<I: IntoIterator<Item = (K, Vec<f32>)>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl VectorSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError> {
        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .ok_or_else(|| VectorError::MissingVector(text.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn returns_vectors_in_request_order() {
        let mut source: StaticSource = [("a", vec![0.0, 1.0]), ("b", vec![1.0, 0.0])]
            .into_iter()
            .collect();
        let vectors = source
            .embed(&["b".to_string(), "a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn missing_keyword_is_an_error() {
        let mut source = StaticSource::new().with("a", vec![0.0]);
        let err = source.embed(&["zzz".to_string()]).unwrap_err();
        assert!(matches!(err, VectorError::MissingVector(k) if k == "zzz"));
    }
}
