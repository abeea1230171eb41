//! Pillar selection inside each topic cluster.
//!
//! The pillar is the member with the fewest characters; on a tie the member
//! that comes first in input order wins. Everyone else is supporting content.
//! Singleton clusters are dropped here and never reach the report.

use std::collections::BTreeMap;

use ciq_core::{KeywordRecord, Role};

use crate::error::PlanError;

/// A cluster with two or more members and its chosen pillar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: usize,
    /// Record indices in input order.
    pub members: Vec<usize>,
    /// Record index of the pillar; always one of `members`.
    pub pillar: usize,
}

impl Cluster {
    #[must_use]
    pub fn role_of(&self, index: usize) -> Option<Role> {
        if index == self.pillar {
            Some(Role::Pillar)
        } else if self.members.contains(&index) {
            Some(Role::Supporting)
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of role assignment over one grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Clusters of size two or more, ordered by id.
    pub clusters: Vec<Cluster>,
    /// Number of clusters produced by grouping, singletons included.
    pub total_clusters: usize,
    /// Singleton clusters that were dropped.
    pub dropped_singletons: usize,
}

/// Pick one pillar per non-trivial cluster.
///
/// `labels[i]` is the cluster id of `records[i]`.
///
/// # Errors
///
/// Returns [`PlanError::LengthMismatch`] if `labels` and `records` differ in length.
pub fn assign_roles(records: &[KeywordRecord], labels: &[usize]) -> Result<RoleAssignment, PlanError> {
    if records.len() != labels.len() {
        return Err(PlanError::LengthMismatch {
            what: "cluster labels",
            expected: records.len(),
            actual: labels.len(),
        });
    }

    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(index);
    }

    let total_clusters = groups.len();
    let mut dropped_singletons = 0usize;
    let mut clusters = Vec::new();

    for (id, members) in groups {
        if members.len() < 2 {
            dropped_singletons += 1;
            continue;
        }
        // `min_by_key` returns the first of several equal minima.
        let Some(pillar) = members
            .iter()
            .copied()
            .min_by_key(|&index| records[index].char_len())
        else {
            continue;
        };
        clusters.push(Cluster { id, members, pillar });
    }

    Ok(RoleAssignment {
        clusters,
        total_clusters,
        dropped_singletons,
    })
}
