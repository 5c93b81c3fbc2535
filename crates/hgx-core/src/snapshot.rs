//! # Serializable Snapshot
//!
//! A flat, serde-friendly image of a store: its configuration, every node
//! with its metadata, and every edge with its weight and metadata, in
//! enumeration order.
//!
//! Restoring a snapshot replays the edges through `add_edge`, so a
//! hand-written snapshot is validated exactly like live input.

use crate::config::HypergraphConfig;
use crate::graph::Hypergraph;
use crate::types::{HypergraphError, Metadata, NodeKey};
use serde::{Deserialize, Serialize};

/// A node and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<N> {
    pub id: N,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// An edge with its weight (weighted stores only) and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<N> {
    pub nodes: Vec<N>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// Serializable image of a `Hypergraph`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergraphSnapshot<N> {
    #[serde(default)]
    pub config: HypergraphConfig,
    #[serde(default)]
    pub nodes: Vec<NodeRecord<N>>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord<N>>,
}

impl<N: NodeKey> From<&Hypergraph<N>> for HypergraphSnapshot<N> {
    fn from(hypergraph: &Hypergraph<N>) -> Self {
        let weighted = hypergraph.is_weighted();
        Self {
            config: hypergraph.config,
            nodes: hypergraph
                .nodes
                .iter()
                .map(|(id, entry)| NodeRecord {
                    id: id.clone(),
                    metadata: entry.metadata.clone(),
                })
                .collect(),
            edges: hypergraph
                .edges
                .values()
                .map(|entry| EdgeRecord {
                    nodes: entry.edge.nodes().to_vec(),
                    weight: weighted.then_some(entry.weight),
                    metadata: entry.metadata.clone(),
                })
                .collect(),
        }
    }
}

impl<N: NodeKey> TryFrom<HypergraphSnapshot<N>> for Hypergraph<N> {
    type Error = HypergraphError;

    /// Rebuild a store. An invalid edge fails with `BatchFailed` carrying
    /// its position in `edges`.
    fn try_from(snapshot: HypergraphSnapshot<N>) -> Result<Self, Self::Error> {
        let mut hypergraph = Self::with_config(snapshot.config);
        for node in snapshot.nodes {
            hypergraph.add_node_with_meta(node.id, node.metadata);
        }
        for (index, record) in snapshot.edges.into_iter().enumerate() {
            let metadata = (!record.metadata.is_empty()).then_some(record.metadata);
            hypergraph
                .add_edge(record.nodes, record.weight, metadata)
                .map_err(|e| HypergraphError::at(index, e))?;
        }
        Ok(hypergraph)
    }
}

impl<N: NodeKey> Hypergraph<N> {
    /// Capture the current state as a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> HypergraphSnapshot<N> {
        HypergraphSnapshot::from(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
