//! Flattening clusters into report rows.

use ciq_core::{KeywordRecord, LinkRecord, PlanRow, PlanSummary, Role};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::links::plan_link;
use crate::roles::RoleAssignment;
use crate::scoring::{IntentWeights, score_record};

/// Switches that shape the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    /// Fill the URL and anchor columns. When off they stay empty.
    pub link_planning: bool,
    pub weights: IntentWeights,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            link_planning: true,
            weights: IntentWeights::default(),
        }
    }
}

/// The finished content plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContentPlan {
    pub rows: Vec<PlanRow>,
    pub summary: PlanSummary,
}

impl ContentPlan {
    /// Topic map: one `Cluster <id>: <pillar>` line per cluster followed by
    /// its supporting keywords in row order.
    #[must_use]
    pub fn outline(&self) -> String {
        self.rows
            .chunk_by(|a, b| a.cluster_id == b.cluster_id)
            .map(|cluster| {
                let pillar = cluster
                    .iter()
                    .find(|row| row.role.is_pillar())
                    .map_or("", |row| row.keyword.as_str());
                let mut block = format!("Cluster {}: {pillar}\n", cluster[0].cluster_id);
                for row in cluster.iter().filter(|row| !row.role.is_pillar()) {
                    block.push_str("  - ");
                    block.push_str(&row.keyword);
                    block.push('\n');
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build report rows for every non-trivial cluster.
///
/// Clusters keep their id order. Within a cluster members keep input order
/// and the pillar sits wherever it appeared in the input.
#[must_use]
pub fn assemble(
    records: &[KeywordRecord],
    assignment: &RoleAssignment,
    options: &ReportOptions,
) -> ContentPlan {
    let mut summary = PlanSummary {
        keywords: records.len(),
        clusters: assignment.total_clusters,
        content_clusters: assignment.clusters.len(),
        dropped_singletons: assignment.dropped_singletons,
        ..PlanSummary::default()
    };
    let mut rows = Vec::new();

    for cluster in &assignment.clusters {
        let pillar = &records[cluster.pillar];
        for &index in &cluster.members {
            let role = cluster.role_of(index).unwrap_or(Role::Supporting);
            let record = &records[index];
            let score = score_record(record, &options.weights);
            let link = if options.link_planning {
                plan_link(&record.keyword, role, &pillar.keyword)
            } else {
                LinkRecord::default()
            };

            match role {
                Role::Pillar => summary.pillars += 1,
                Role::Supporting => summary.supporting += 1,
            }
            summary.tiers.record(score.tier);

            rows.push(PlanRow {
                cluster_id: cluster.id,
                role,
                keyword: record.keyword.clone(),
                suggested_url: link.suggested_url,
                link_target_url: link.link_target_url.unwrap_or_default(),
                anchor_text: link.anchor_text.unwrap_or_default(),
                intent: record.raw.intent.clone().unwrap_or_default(),
                volume: record.raw.volume.clone().unwrap_or_default(),
                difficulty: record.raw.difficulty.clone().unwrap_or_default(),
                score: score.rounded(),
                priority: score.tier,
            });
        }
    }

    summary.rows = rows.len();
    ContentPlan { rows, summary }
}
