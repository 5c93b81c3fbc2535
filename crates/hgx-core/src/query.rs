//! # Query Module
//!
//! Order/size filters and the structural queries of the store.
//!
//! - One filter type for every order/size-scoped query
//! - Filtered queries read the order index, never scan the edge map
//! - Results come back in edge enumeration order (insertion order)

use crate::encoder::LabelEncoder;
use crate::graph::{EdgeId, Hypergraph};
use crate::types::{Edge, HypergraphError, Metadata, NodeKey};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

// =============================================================================
// EDGE FILTER
// =============================================================================

/// Selects edges by order or size.
///
/// `up_to` widens an exact match to "every order (size) less than or equal
/// to the given value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeFilter {
    /// Every edge.
    #[default]
    All,
    /// Edges of order `order` (or `<= order` with `up_to`).
    Order { order: usize, up_to: bool },
    /// Edges of size `size` (or `<= size` with `up_to`).
    Size { size: usize, up_to: bool },
}

impl EdgeFilter {
    /// Exact order match.
    #[must_use]
    pub fn order(order: usize) -> Self {
        Self::Order { order, up_to: false }
    }

    /// Exact size match.
    #[must_use]
    pub fn size(size: usize) -> Self {
        Self::Size { size, up_to: false }
    }

    /// Widen to "less than or equal".
    #[must_use]
    pub fn up_to(self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Order { order, .. } => Self::Order { order, up_to: true },
            Self::Size { size, .. } => Self::Size { size, up_to: true },
        }
    }

    /// Build a filter from optional order/size arguments.
    ///
    /// Supplying both is accepted only when they agree (`size == order + 1`).
    pub fn from_parts(
        order: Option<usize>,
        size: Option<usize>,
        up_to: bool,
    ) -> Result<Self, HypergraphError> {
        match (order, size) {
            (None, None) => Ok(Self::All),
            (Some(order), None) => Ok(Self::Order { order, up_to }),
            (None, Some(size)) => Ok(Self::Size { size, up_to }),
            (Some(order), Some(size)) if order.checked_add(1) == Some(size) => {
                Ok(Self::Order { order, up_to })
            }
            (Some(order), Some(size)) => Err(HypergraphError::InvalidInput(format!(
                "order {} and size {} are inconsistent (size must equal order + 1)",
                order, size
            ))),
        }
    }

    /// The inclusive range of orders selected, or `None` for `All`.
    pub fn order_range(&self) -> Result<Option<RangeInclusive<usize>>, HypergraphError> {
        let (order, up_to) = match *self {
            Self::All => return Ok(None),
            Self::Order { order, up_to } => (order, up_to),
            Self::Size { size: 0, .. } => {
                return Err(HypergraphError::InvalidInput(
                    "edge size must be at least 1".to_string(),
                ));
            }
            Self::Size { size, up_to } => (size - 1, up_to),
        };
        Ok(Some(if up_to { 0..=order } else { order..=order }))
    }

    /// Check whether an edge of the given order passes the filter.
    pub fn matches(&self, order: usize) -> Result<bool, HypergraphError> {
        Ok(self.order_range()?.is_none_or(|range| range.contains(&order)))
    }
}

// =============================================================================
// STRUCTURAL QUERIES
// =============================================================================

impl<N: NodeKey> Hypergraph<N> {
    /// Ids selected by a filter, in enumeration order.
    pub(crate) fn filtered_ids(&self, filter: EdgeFilter) -> Result<Vec<EdgeId>, HypergraphError> {
        match filter.order_range()? {
            None => Ok(self.edges.keys().copied().collect()),
            Some(range) => {
                let ids: BTreeSet<EdgeId> = self
                    .edges_by_order
                    .range(range)
                    .flat_map(|(_, ids)| ids.iter().copied())
                    .collect();
                Ok(ids.into_iter().collect())
            }
        }
    }

    /// All node ids in ascending order.
    #[must_use]
    pub fn get_nodes(&self) -> Vec<N> {
        self.nodes.keys().cloned().collect()
    }

    /// All node ids paired with their metadata.
    #[must_use]
    pub fn get_nodes_with_meta(&self) -> Vec<(N, &Metadata)> {
        self.nodes
            .iter()
            .map(|(node, entry)| (node.clone(), &entry.metadata))
            .collect()
    }

    /// Edges passing the filter, in enumeration order.
    pub fn get_edges(&self, filter: EdgeFilter) -> Result<Vec<&Edge<N>>, HypergraphError> {
        self.filtered_ids(filter)?
            .into_iter()
            .map(|id| self.edge_entry(id).map(|e| &e.edge))
            .collect()
    }

    /// Edges passing the filter, paired with their metadata.
    pub fn get_edges_with_meta(
        &self,
        filter: EdgeFilter,
    ) -> Result<Vec<(&Edge<N>, &Metadata)>, HypergraphError> {
        self.filtered_ids(filter)?
            .into_iter()
            .map(|id| self.edge_entry(id).map(|e| (&e.edge, &e.metadata)))
            .collect()
    }

    /// Weights of the edges passing the filter, in enumeration order.
    pub fn get_weights(&self, filter: EdgeFilter) -> Result<Vec<f64>, HypergraphError> {
        self.require_weighted()?;
        self.filtered_ids(filter)?
            .into_iter()
            .map(|id| self.edge_entry(id).map(|e| e.weight))
            .collect()
    }

    /// Order of every edge, in enumeration order.
    #[must_use]
    pub fn get_orders(&self) -> Vec<usize> {
        self.edges.values().map(|e| e.edge.order()).collect()
    }

    /// Size of every edge, in enumeration order.
    #[must_use]
    pub fn get_sizes(&self) -> Vec<usize> {
        self.edges.values().map(|e| e.edge.size()).collect()
    }

    /// Number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges passing the filter.
    pub fn num_edges(&self, filter: EdgeFilter) -> Result<usize, HypergraphError> {
        match filter.order_range()? {
            None => Ok(self.edges.len()),
            Some(range) => Ok(self.edges_by_order.range(range).map(|(_, ids)| ids.len()).sum()),
        }
    }

    /// Largest edge order, `None` if there are no edges.
    #[must_use]
    pub fn max_order(&self) -> Option<usize> {
        self.edges_by_order.last_key_value().map(|(order, _)| *order)
    }

    /// Largest edge size, `None` if there are no edges.
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.max_order().map(|order| order + 1)
    }

    /// True iff all edges share one size (vacuously true with no edges).
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.edges_by_order.len() <= 1
    }

    /// Edge count per size.
    #[must_use]
    pub fn distribution_sizes(&self) -> BTreeMap<usize, usize> {
        self.edges_by_order
            .iter()
            .map(|(order, ids)| (order + 1, ids.len()))
            .collect()
    }

    /// Edges containing `node` and passing the filter.
    pub fn get_incident_edges(
        &self,
        node: &N,
        filter: EdgeFilter,
    ) -> Result<Vec<&Edge<N>>, HypergraphError> {
        let range = filter.order_range()?;
        let entry = self.node_entry(node)?;

        let mut edges = Vec::with_capacity(entry.incident.len());
        for id in &entry.incident {
            let edge = &self.edge_entry(*id)?.edge;
            if range.as_ref().is_none_or(|r| r.contains(&edge.order())) {
                edges.push(edge);
            }
        }
        Ok(edges)
    }

    /// Nodes sharing at least one filtered edge with `node`, excluding `node`.
    pub fn get_neighbors(
        &self,
        node: &N,
        filter: EdgeFilter,
    ) -> Result<BTreeSet<N>, HypergraphError> {
        let mut neighbors = BTreeSet::new();
        for edge in self.get_incident_edges(node, filter)? {
            neighbors.extend(edge.nodes().iter().filter(|n| *n != node).cloned());
        }
        Ok(neighbors)
    }

    /// Dense encoding of the current node set onto `0..num_nodes()`.
    ///
    /// The encoder is a snapshot; derive a fresh one after adding or
    /// removing nodes.
    #[must_use]
    pub fn get_mapping(&self) -> LabelEncoder<N> {
        LabelEncoder::fit(self.nodes.keys().cloned())
    }
}

// =============================================================================
// TESTS
// =============================================================================
