//! Internal-link graph over a content plan.

use std::collections::HashMap;

use ciq_core::{PlanRow, PriorityTier, Role};
use rustworkx_core::connectivity::connected_components;
use rustworkx_core::petgraph::Direction;
use rustworkx_core::petgraph::algo::toposort;
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::report::ContentPlan;

/// A page in the link graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GraphNode {
    /// Position of the row in the plan.
    pub id: usize,
    pub keyword: String,
    pub url: String,
    pub role: Role,
    pub cluster_id: usize,
    pub tier: PriorityTier,
}

/// A link from supporting content to its pillar.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub anchor_text: String,
}

/// Serialisable node/edge lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Shape of the link graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GraphAnalysis {
    pub node_count: usize,
    pub edge_count: usize,
    pub components: usize,
    pub has_cycles: bool,
    /// `(pillar keyword, inbound links)` in cluster order.
    pub hubs: Vec<(String, usize)>,
}

/// Directed graph, supporting → pillar.
pub struct LinkGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
}

impl LinkGraph {
    #[must_use]
    pub fn from_plan(plan: &ContentPlan) -> Self {
        Self::from_rows(&plan.rows)
    }

    /// Every row becomes a node; each supporting row links to the pillar of
    /// its cluster wherever that pillar sits in the row order.
    #[must_use]
    pub fn from_rows(rows: &[PlanRow]) -> Self {
        let mut graph = DiGraph::with_capacity(rows.len(), rows.len());
        let mut pillars: HashMap<usize, NodeIndex> = HashMap::new();

        let nodes: Vec<NodeIndex> = rows
            .iter()
            .enumerate()
            .map(|(id, row)| {
                let index = graph.add_node(GraphNode {
                    id,
                    keyword: row.keyword.clone(),
                    url: row.suggested_url.clone(),
                    role: row.role,
                    cluster_id: row.cluster_id,
                    tier: row.priority,
                });
                if row.role.is_pillar() {
                    pillars.insert(row.cluster_id, index);
                }
                index
            })
            .collect();

        for ((id, row), &index) in rows.iter().enumerate().zip(&nodes) {
            if row.role.is_pillar() {
                continue;
            }
            let Some(&pillar) = pillars.get(&row.cluster_id) else {
                continue;
            };
            let target = &graph[pillar];
            let edge = GraphEdge {
                source: id,
                target: target.id,
                anchor_text: if row.anchor_text.is_empty() {
                    target.keyword.clone()
                } else {
                    row.anchor_text.clone()
                },
            };
            graph.add_edge(index, pillar, edge);
        }

        Self { graph }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weakly connected component count. One per content cluster.
    #[must_use]
    pub fn connected_components(&self) -> usize {
        connected_components(&self.graph).len()
    }

    #[must_use]
    pub fn has_cycles(&self) -> bool {
        toposort(&self.graph, None).is_err()
    }

    /// Inbound link count of every pillar.
    #[must_use]
    pub fn hubs(&self) -> Vec<(String, usize)> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].role.is_pillar())
            .map(|idx| {
                (
                    self.graph[idx].keyword.clone(),
                    self.graph
                        .neighbors_directed(idx, Direction::Incoming)
                        .count(),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn analyze(&self) -> GraphAnalysis {
        GraphAnalysis {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            components: self.connected_components(),
            has_cycles: self.has_cycles(),
            hubs: self.hubs(),
        }
    }

    #[must_use]
    pub fn export(&self) -> GraphExport {
        GraphExport {
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self.graph.edge_weights().cloned().collect(),
        }
    }
}
