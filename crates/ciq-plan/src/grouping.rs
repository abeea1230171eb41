//! Distance-threshold agglomerative grouping of keyword vectors.
//!
//! Every keyword starts as its own cluster. The two closest clusters (by the
//! configured linkage) are merged repeatedly; a merge is kept only while its
//! linkage distance is strictly below the threshold. There is no target
//! cluster count.
//!
//! The merge order is found with the nearest-neighbour chain algorithm over a
//! condensed pairwise distance matrix, using Lance–Williams updates. All four
//! supported linkages are reducible, so the chain yields the same dendrogram
//! as the naive "merge the global closest pair" loop in `O(n²)` time.
//!
//! Cluster ids are dense (`0..k`) and numbered by first appearance in input
//! order.

use ciq_config::ClusteringConfig;
use ciq_core::{DistanceMetric, Linkage};
use rayon::prelude::*;
use tracing::debug;

use crate::error::PlanError;

/// Grouping engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingParams {
    /// Merges at or above this linkage distance are not applied.
    pub threshold: f64,
    pub linkage: Linkage,
    pub metric: DistanceMetric,
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            threshold: ciq_config::DEFAULT_THRESHOLD,
            linkage: Linkage::Ward,
            metric: DistanceMetric::Euclidean,
        }
    }
}

impl From<&ClusteringConfig> for GroupingParams {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            threshold: config.threshold,
            linkage: config.linkage,
            metric: config.metric,
        }
    }
}

impl GroupingParams {
    /// Reject non-positive thresholds and ward over non-Euclidean distances.
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidThreshold`] or [`PlanError::IncompatibleLinkage`].
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(PlanError::InvalidThreshold(self.threshold));
        }
        if self.linkage == Linkage::Ward && self.metric != DistanceMetric::Euclidean {
            return Err(PlanError::IncompatibleLinkage {
                linkage: self.linkage,
                metric: self.metric,
            });
        }
        Ok(())
    }
}

/// One step of the dendrogram: clusters represented by slots `a` and `b`
/// were joined at `distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

/// Assign a cluster id to every vector.
///
/// # Errors
///
/// Returns an error for invalid parameters, vectors of differing length, or
/// vectors containing non-finite values.
pub fn group(vectors: &[Vec<f32>], params: &GroupingParams) -> Result<Vec<usize>, PlanError> {
    params.validate()?;
    validate_vectors(vectors)?;

    let n = vectors.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut distances = CondensedMatrix::from_vectors(vectors, params.metric);
    let merges = nn_chain(&mut distances, params.linkage);

    let mut sets = DisjointSets::new(n);
    let mut applied = 0usize;
    for merge in &merges {
        if merge.distance < params.threshold {
            sets.union(merge.a, merge.b);
            applied += 1;
        }
    }

    let labels = sets.dense_labels();
    debug!(
        keywords = n,
        merges_applied = applied,
        clusters = labels.iter().max().map_or(0, |max| max + 1),
        threshold = params.threshold,
        linkage = %params.linkage,
        "grouping complete"
    );
    Ok(labels)
}

/// Full merge history for `vectors`, in the order the merges were found.
///
/// # Errors
///
/// Same as [`group`].
pub fn dendrogram(vectors: &[Vec<f32>], params: &GroupingParams) -> Result<Vec<Merge>, PlanError> {
    params.validate()?;
    validate_vectors(vectors)?;
    if vectors.is_empty() {
        return Ok(Vec::new());
    }
    let mut distances = CondensedMatrix::from_vectors(vectors, params.metric);
    Ok(nn_chain(&mut distances, params.linkage))
}

fn validate_vectors(vectors: &[Vec<f32>]) -> Result<(), PlanError> {
    let Some(first) = vectors.first() else {
        return Ok(());
    };
    let expected = first.len();
    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != expected {
            return Err(PlanError::DimensionMismatch {
                index,
                expected,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(PlanError::NonFiniteVector { index });
        }
    }
    Ok(())
}

/// Distance between two vectors.
#[must_use]
pub fn distance(a: &[f32], b: &[f32], metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Euclidean => a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let d = f64::from(*x) - f64::from(*y);
                d * d
            })
            .sum::<f64>()
            .sqrt(),
        DistanceMetric::Cosine => {
            let mut dot = 0.0_f64;
            let mut norm_a = 0.0_f64;
            let mut norm_b = 0.0_f64;
            for (x, y) in a.iter().zip(b) {
                let (x, y) = (f64::from(*x), f64::from(*y));
                dot += x * y;
                norm_a += x * x;
                norm_b += y * y;
            }
            match (norm_a > 0.0, norm_b > 0.0) {
                (false, false) => 0.0,
                (true, true) => (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 2.0),
                _ => 1.0,
            }
        }
    }
}

/// Upper triangle of a symmetric distance matrix, row-major.
struct CondensedMatrix {
    n: usize,
    values: Vec<f64>,
}

impl CondensedMatrix {
    fn from_vectors(vectors: &[Vec<f32>], metric: DistanceMetric) -> Self {
        let n = vectors.len();
        let values = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let row = &vectors[i];
                vectors[i + 1..]
                    .iter()
                    .map(move |other| distance(row, other, metric))
            })
            .collect();
        Self { n, values }
    }

    const fn index(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.n * i - i * (i + 1) / 2 + (j - i - 1)
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.index(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.values[idx] = value;
    }
}

/// Lance–Williams distance from the union of `a` and `b` to `k`.
fn lance_williams(
    linkage: Linkage,
    d_ak: f64,
    d_bk: f64,
    d_ab: f64,
    size_a: f64,
    size_b: f64,
    size_k: f64,
) -> f64 {
    match linkage {
        Linkage::Single => d_ak.min(d_bk),
        Linkage::Complete => d_ak.max(d_bk),
        Linkage::Average => size_a.mul_add(d_ak, size_b * d_bk) / (size_a + size_b),
        Linkage::Ward => {
            let total = size_a + size_b + size_k;
            let squared = ((size_a + size_k) * d_ak * d_ak + (size_b + size_k) * d_bk * d_bk
                - size_k * d_ab * d_ab)
                / total;
            squared.max(0.0).sqrt()
        }
    }
}

/// Extend the chain until its last two elements are reciprocal nearest
/// neighbours, and return that pair.
fn grow_chain(
    chain: &mut Vec<usize>,
    active: &[bool],
    distances: &CondensedMatrix,
) -> Option<(usize, usize)> {
    loop {
        let &tip = chain.last()?;
        let previous = chain.len().checked_sub(2).map(|i| chain[i]);

        // The previous chain element wins ties so reciprocal pairs are found.
        let mut best = previous;
        let mut best_distance = previous.map_or(f64::INFINITY, |p| distances.get(tip, p));
        for candidate in (0..active.len()).filter(|&c| active[c] && c != tip) {
            let d = distances.get(tip, candidate);
            if d < best_distance {
                best = Some(candidate);
                best_distance = d;
            }
        }

        let next = best?;
        if Some(next) == previous {
            return Some((tip, next));
        }
        chain.push(next);
    }
}

#[allow(clippy::cast_precision_loss)]
fn nn_chain(distances: &mut CondensedMatrix, linkage: Linkage) -> Vec<Merge> {
    let n = distances.n;
    let mut active = vec![true; n];
    let mut sizes = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    while merges.len() + 1 < n {
        if chain.is_empty() {
            if let Some(first) = active.iter().position(|&alive| alive) {
                chain.push(first);
            }
        }

        let Some((a, b)) = grow_chain(&mut chain, &active, distances) else {
            break;
        };
        chain.truncate(chain.len() - 2);

        let d_ab = distances.get(a, b);
        let (keep, drop) = if a < b { (a, b) } else { (b, a) };
        let (size_keep, size_drop) = (sizes[keep] as f64, sizes[drop] as f64);

        for k in 0..n {
            if !active[k] || k == keep || k == drop {
                continue;
            }
            let updated = lance_williams(
                linkage,
                distances.get(keep, k),
                distances.get(drop, k),
                d_ab,
                size_keep,
                size_drop,
                sizes[k] as f64,
            );
            distances.set(keep, k, updated);
        }

        active[drop] = false;
        sizes[keep] += sizes[drop];
        merges.push(Merge {
            a: keep,
            b: drop,
            distance: d_ab,
        });
    }

    merges
}

/// Union-find over keyword indices.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }

    /// Dense ids numbered by first appearance.
    fn dense_labels(&mut self) -> Vec<usize> {
        let n = self.parent.len();
        let mut ids = vec![usize::MAX; n];
        let mut next = 0usize;
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let root = self.find(i);
            if ids[root] == usize::MAX {
                ids[root] = next;
                next += 1;
            }
            labels.push(ids[root]);
        }
        labels
    }
}
