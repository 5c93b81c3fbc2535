//! # Hypergraph Store
//!
//! The deterministic storage for nodes and hyperedges.
//!
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering.
//! Edges are keyed by a monotonically increasing internal id, so iterating
//! the edge map yields insertion order.
//!
//! ## Indices
//!
//! | Index            | Maps                          |
//! |------------------|-------------------------------|
//! | `nodes`          | node -> incident edge ids     |
//! | `edge_index`     | canonical edge -> edge id     |
//! | `edges_by_order` | order -> edge ids             |
//!
//! Every mutation updates all three before returning.

use crate::config::{DuplicatePolicy, HypergraphConfig, MissingPolicy};
use crate::types::{Edge, Entity, HypergraphError, MetaValue, Metadata, NodeKey, describe};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Weight stored for every edge of an unweighted store. Never exposed.
const UNIT_WEIGHT: f64 = 1.0;

// =============================================================================
// INTERNAL ENTRIES
// =============================================================================

/// Internal edge identifier. Allocation order is enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EdgeId(pub(crate) u64);

#[derive(Debug, Clone, Default)]
pub(crate) struct NodeEntry {
    /// Edges containing this node.
    pub(crate) incident: BTreeSet<EdgeId>,
    pub(crate) metadata: Metadata,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeEntry<N> {
    pub(crate) edge: Edge<N>,
    pub(crate) weight: f64,
    pub(crate) metadata: Metadata,
}

// =============================================================================
// HYPERGRAPH
// =============================================================================

/// A mutable store of nodes and hyperedges.
///
/// ```
/// use hgx_core::{Hypergraph, HypergraphConfig};
///
/// let mut hg = Hypergraph::with_config(HypergraphConfig::weighted());
/// hg.add_edge([3, 1, 2], Some(2.5), None).expect("add");
///
/// assert!(hg.check_edge(&[1, 2, 3]));
/// assert_eq!(hg.get_weight(&[2, 3, 1]).expect("weight"), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct Hypergraph<N = u64> {
    pub(crate) config: HypergraphConfig,

    /// Node storage: node -> (incident edges, metadata)
    pub(crate) nodes: BTreeMap<N, NodeEntry>,

    /// Edge storage: id -> (canonical edge, weight, metadata)
    pub(crate) edges: BTreeMap<EdgeId, EdgeEntry<N>>,

    /// Reverse lookup: canonical edge -> id
    pub(crate) edge_index: BTreeMap<Edge<N>, EdgeId>,

    /// Order index: order -> ids
    pub(crate) edges_by_order: BTreeMap<usize, BTreeSet<EdgeId>>,

    /// Next available EdgeId
    pub(crate) next_edge_id: u64,
}

impl<N: NodeKey> Default for Hypergraph<N> {
    fn default() -> Self {
        Self::with_config(HypergraphConfig::default())
    }
}

impl<N: NodeKey> Hypergraph<N> {
    /// Create an empty unweighted store with default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: HypergraphConfig) -> Self {
        Self {
            config,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            edge_index: BTreeMap::new(),
            edges_by_order: BTreeMap::new(),
            next_edge_id: 0,
        }
    }

    /// Build a store from an edge list.
    ///
    /// `weights` and `metadata`, when given, must have one entry per edge.
    /// A weighted store requires `weights`; an unweighted one rejects them.
    pub fn from_edges<E, I>(
        config: HypergraphConfig,
        edges: E,
        weights: Option<&[f64]>,
        metadata: Option<&[Metadata]>,
    ) -> Result<Self, HypergraphError>
    where
        E: IntoIterator<Item = I>,
        I: IntoIterator<Item = N>,
    {
        let mut hypergraph = Self::with_config(config);
        hypergraph.add_edges(edges, weights, metadata)?;
        Ok(hypergraph)
    }

    /// The construction-time configuration.
    #[must_use]
    pub fn config(&self) -> &HypergraphConfig {
        &self.config
    }

    /// True iff the store was declared weighted.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.config.weighted
    }

    /// An independent deep copy of the store.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // =========================================================================
    // NODES
    // =========================================================================

    /// Insert a node if absent. Returns `true` if it was inserted.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, NodeEntry::default());
        true
    }

    /// Insert a node if absent and merge `metadata` into its bag.
    pub fn add_node_with_meta(&mut self, node: N, metadata: Metadata) -> bool {
        let inserted = !self.nodes.contains_key(&node);
        self.nodes.entry(node).or_default().metadata.extend(metadata);
        inserted
    }

    /// Existence test.
    #[must_use]
    pub fn check_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    /// Remove a node.
    ///
    /// With `keep_edges == false` every incident edge is removed as well.
    /// With `keep_edges == true` each incident edge is rewritten without the
    /// node: an edge left empty is deleted, and an edge whose new member set
    /// is already stored collapses into that edge (the survivor keeps its
    /// weight and gains any metadata keys it lacked).
    ///
    /// Returns `Ok(false)` only under `MissingPolicy::Ignore` when the node
    /// is absent.
    pub fn remove_node(&mut self, node: &N, keep_edges: bool) -> Result<bool, HypergraphError> {
        let Some(entry) = self.nodes.remove(node) else {
            return self.missing(HypergraphError::NodeNotFound(describe(node)));
        };

        let affected = entry.incident.len();
        for id in entry.incident {
            if keep_edges {
                self.shrink_edge(id, node);
            } else {
                self.detach_edge(id);
            }
        }

        tracing::debug!(node = ?node, keep_edges, affected, "removed node");
        Ok(true)
    }

    // =========================================================================
    // EDGES
    // =========================================================================

    /// Insert an edge given its members in any order.
    ///
    /// Missing member nodes are created. If the canonical edge is already
    /// stored, the configured `DuplicatePolicy` decides what happens to the
    /// weight; supplied metadata is merged into the stored bag.
    ///
    /// Returns the canonical edge.
    pub fn add_edge<I>(
        &mut self,
        members: I,
        weight: Option<f64>,
        metadata: Option<Metadata>,
    ) -> Result<Edge<N>, HypergraphError>
    where
        I: IntoIterator<Item = N>,
    {
        let edge = Edge::new(members)?;
        let weight = self.validate_weight(weight)?;

        if let Some(&id) = self.edge_index.get(&edge) {
            self.merge_duplicate(id, &edge, weight, metadata)?;
            return Ok(edge);
        }

        self.attach_edge(edge.clone(), weight, metadata.unwrap_or_default());
        Ok(edge)
    }

    /// Remove an edge by its members (any order).
    ///
    /// Returns `Ok(false)` only under `MissingPolicy::Ignore` when the edge
    /// is absent. Member nodes stay in the store.
    pub fn remove_edge(&mut self, members: &[N]) -> Result<bool, HypergraphError> {
        let edge = Edge::from_slice(members)?;
        match self.edge_index.get(&edge).copied() {
            Some(id) => {
                self.detach_edge(id);
                Ok(true)
            }
            None => self.missing(HypergraphError::EdgeNotFound(edge.to_string())),
        }
    }

    /// Canonical-form membership test.
    #[must_use]
    pub fn check_edge(&self, members: &[N]) -> bool {
        Edge::from_slice(members).is_ok_and(|edge| self.edge_index.contains_key(&edge))
    }

    // =========================================================================
    // WEIGHTS
    // =========================================================================

    /// Weight of an edge.
    pub fn get_weight(&self, members: &[N]) -> Result<f64, HypergraphError> {
        self.require_weighted()?;
        let id = self.find_edge(members)?;
        Ok(self.edge_entry(id)?.weight)
    }

    /// Replace the weight of an edge (last write wins).
    pub fn set_weight(&mut self, members: &[N], weight: f64) -> Result<(), HypergraphError> {
        self.require_weighted()?;
        let weight = finite(weight)?;
        let id = self.find_edge(members)?;
        let entry = self.edges.get_mut(&id).ok_or_else(|| dangling(id))?;
        entry.weight = weight;
        Ok(())
    }

    // =========================================================================
    // METADATA
    // =========================================================================

    /// Replace the whole metadata bag of a node or edge.
    pub fn set_meta(
        &mut self,
        target: &Entity<N>,
        metadata: Metadata,
    ) -> Result<(), HypergraphError> {
        *self.meta_slot_mut(target)? = metadata;
        Ok(())
    }

    /// Set a single attribute on a node or edge.
    pub fn set_attr_meta(
        &mut self,
        target: &Entity<N>,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Result<(), HypergraphError> {
        self.meta_slot_mut(target)?.insert(key.into(), value.into());
        Ok(())
    }

    /// The metadata bag of a node or edge (possibly empty).
    pub fn get_meta(&self, target: &Entity<N>) -> Result<&Metadata, HypergraphError> {
        self.meta_slot(target)
    }

    /// A single attribute of a node or edge.
    pub fn get_attr_meta(
        &self,
        target: &Entity<N>,
        key: &str,
    ) -> Result<&MetaValue, HypergraphError> {
        self.meta_slot(target)?
            .get(key)
            .ok_or_else(|| HypergraphError::AttributeNotFound {
                object: target.to_string(),
                attribute: key.to_string(),
            })
    }

    /// Remove and return a single attribute.
    pub fn remove_attr_meta(
        &mut self,
        target: &Entity<N>,
        key: &str,
    ) -> Result<MetaValue, HypergraphError> {
        self.meta_slot_mut(target)?
            .remove(key)
            .ok_or_else(|| HypergraphError::AttributeNotFound {
                object: target.to_string(),
                attribute: key.to_string(),
            })
    }

    // =========================================================================
    // INTEGRITY
    // =========================================================================

    /// Cross-check every index against the edge set.
    ///
    /// Walks all nodes and edges; intended for tests and debugging.
    pub fn verify_integrity(&self) -> Result<(), HypergraphError> {
        let broken = |msg: String| Err(HypergraphError::IndexInconsistency(msg));

        if self.edge_index.len() != self.edges.len() {
            return broken(format!(
                "{} canonical keys for {} edges",
                self.edge_index.len(),
                self.edges.len()
            ));
        }

        let indexed: usize = self.edges_by_order.values().map(BTreeSet::len).sum();
        if indexed != self.edges.len() {
            return broken(format!(
                "order index holds {} ids for {} edges",
                indexed,
                self.edges.len()
            ));
        }
        if let Some((order, _)) = self.edges_by_order.iter().find(|(_, ids)| ids.is_empty()) {
            return broken(format!("empty bucket for order {}", order));
        }

        for (&id, entry) in &self.edges {
            if id.0 >= self.next_edge_id {
                return broken(format!("edge id {} beyond allocator", id.0));
            }
            if self.edge_index.get(&entry.edge) != Some(&id) {
                return broken(format!("edge {} not keyed to its id", entry.edge));
            }
            let in_bucket = self
                .edges_by_order
                .get(&entry.edge.order())
                .is_some_and(|ids| ids.contains(&id));
            if !in_bucket {
                return broken(format!("edge {} missing from order index", entry.edge));
            }
            for node in entry.edge.nodes() {
                let incident = self
                    .nodes
                    .get(node)
                    .is_some_and(|n| n.incident.contains(&id));
                if !incident {
                    return broken(format!(
                        "edge {} not incident to member {:?}",
                        entry.edge, node
                    ));
                }
            }
        }

        for (node, entry) in &self.nodes {
            for id in &entry.incident {
                let contains = self
                    .edges
                    .get(id)
                    .is_some_and(|e| e.edge.contains(node));
                if !contains {
                    return broken(format!("node {:?} lists foreign edge id {}", node, id.0));
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    /// Resolve members to a stored edge id.
    pub(crate) fn find_edge(&self, members: &[N]) -> Result<EdgeId, HypergraphError> {
        let edge = Edge::from_slice(members)?;
        self.edge_index
            .get(&edge)
            .copied()
            .ok_or_else(|| HypergraphError::EdgeNotFound(edge.to_string()))
    }

    pub(crate) fn edge_entry(&self, id: EdgeId) -> Result<&EdgeEntry<N>, HypergraphError> {
        self.edges.get(&id).ok_or_else(|| dangling(id))
    }

    pub(crate) fn node_entry(&self, node: &N) -> Result<&NodeEntry, HypergraphError> {
        self.nodes
            .get(node)
            .ok_or_else(|| HypergraphError::NodeNotFound(describe(node)))
    }

    /// Insert a new canonical edge and index it. The edge must be absent.
    pub(crate) fn attach_edge(&mut self, edge: Edge<N>, weight: f64, metadata: Metadata) -> EdgeId {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id = self.next_edge_id.saturating_add(1);

        for node in edge.nodes() {
            self.nodes.entry(node.clone()).or_default().incident.insert(id);
        }
        self.edges_by_order.entry(edge.order()).or_default().insert(id);
        self.edge_index.insert(edge.clone(), id);
        self.edges.insert(
            id,
            EdgeEntry {
                edge,
                weight,
                metadata,
            },
        );
        id
    }

    /// Remove an edge from storage and from every index.
    fn detach_edge(&mut self, id: EdgeId) -> Option<EdgeEntry<N>> {
        let entry = self.edges.remove(&id)?;
        self.edge_index.remove(&entry.edge);
        self.unindex_order(entry.edge.order(), id);
        for node in entry.edge.nodes() {
            if let Some(n) = self.nodes.get_mut(node) {
                n.incident.remove(&id);
            }
        }
        Some(entry)
    }

    fn unindex_order(&mut self, order: usize, id: EdgeId) {
        if let Some(ids) = self.edges_by_order.get_mut(&order) {
            ids.remove(&id);
            if ids.is_empty() {
                self.edges_by_order.remove(&order);
            }
        }
    }

    /// Rewrite edge `id` without `node` (keep-edges node removal).
    fn shrink_edge(&mut self, id: EdgeId, node: &N) {
        let Some(old) = self.edges.get(&id).map(|e| e.edge.clone()) else {
            return;
        };

        match old.without(node) {
            None => {
                self.detach_edge(id);
                tracing::trace!(edge = %old, "edge emptied by node removal");
            }
            Some(shrunk) => {
                if let Some(&survivor) = self.edge_index.get(&shrunk) {
                    if let Some(collapsed) = self.detach_edge(id) {
                        if let Some(target) = self.edges.get_mut(&survivor) {
                            for (key, value) in collapsed.metadata {
                                target.metadata.entry(key).or_insert(value);
                            }
                        }
                    }
                    tracing::debug!(edge = %old, into = %shrunk, "edge collapsed into existing edge");
                } else {
                    self.edge_index.remove(&old);
                    self.unindex_order(old.order(), id);
                    self.edges_by_order
                        .entry(shrunk.order())
                        .or_default()
                        .insert(id);
                    self.edge_index.insert(shrunk.clone(), id);
                    if let Some(entry) = self.edges.get_mut(&id) {
                        entry.edge = shrunk;
                    }
                }
            }
        }
    }

    fn merge_duplicate(
        &mut self,
        id: EdgeId,
        edge: &Edge<N>,
        weight: f64,
        metadata: Option<Metadata>,
    ) -> Result<(), HypergraphError> {
        if self.config.on_duplicate == DuplicatePolicy::Reject {
            return Err(HypergraphError::DuplicateEdge(edge.to_string()));
        }

        let weighted = self.config.weighted;
        let policy = self.config.on_duplicate;
        let entry = self.edges.get_mut(&id).ok_or_else(|| dangling(id))?;
        if weighted {
            entry.weight = match policy {
                DuplicatePolicy::Accumulate => finite(entry.weight + weight)?,
                _ => weight,
            };
        }
        if let Some(metadata) = metadata {
            entry.metadata.extend(metadata);
        }
        Ok(())
    }

    /// Check a weight argument against the store mode.
    fn validate_weight(&self, weight: Option<f64>) -> Result<f64, HypergraphError> {
        match (self.config.weighted, weight) {
            (true, Some(w)) => finite(w),
            (true, None) => Err(HypergraphError::InvalidInput(
                "a weighted hypergraph requires a weight for every edge".to_string(),
            )),
            (false, Some(_)) => Err(HypergraphError::NotWeighted),
            (false, None) => Ok(UNIT_WEIGHT),
        }
    }

    pub(crate) fn require_weighted(&self) -> Result<(), HypergraphError> {
        if self.config.weighted {
            Ok(())
        } else {
            Err(HypergraphError::NotWeighted)
        }
    }

    /// Apply the configured `MissingPolicy` to an absent removal target.
    pub(crate) fn missing(&self, err: HypergraphError) -> Result<bool, HypergraphError> {
        match self.config.on_missing {
            MissingPolicy::Strict => Err(err),
            MissingPolicy::Ignore => Ok(false),
        }
    }

    fn meta_slot(&self, target: &Entity<N>) -> Result<&Metadata, HypergraphError> {
        match target {
            Entity::Node(node) => Ok(&self.node_entry(node)?.metadata),
            Entity::Edge(edge) => {
                let id = self
                    .edge_index
                    .get(edge)
                    .ok_or_else(|| HypergraphError::EdgeNotFound(edge.to_string()))?;
                Ok(&self.edge_entry(*id)?.metadata)
            }
        }
    }

    fn meta_slot_mut(&mut self, target: &Entity<N>) -> Result<&mut Metadata, HypergraphError> {
        match target {
            Entity::Node(node) => self
                .nodes
                .get_mut(node)
                .map(|n| &mut n.metadata)
                .ok_or_else(|| HypergraphError::NodeNotFound(describe(node))),
            Entity::Edge(edge) => {
                let id = *self
                    .edge_index
                    .get(edge)
                    .ok_or_else(|| HypergraphError::EdgeNotFound(edge.to_string()))?;
                self.edges
                    .get_mut(&id)
                    .map(|e| &mut e.metadata)
                    .ok_or_else(|| dangling(id))
            }
        }
    }
}

fn finite(weight: f64) -> Result<f64, HypergraphError> {
    if weight.is_finite() {
        Ok(weight)
    } else {
        Err(HypergraphError::InvalidInput(format!(
            "edge weight must be finite, got {}",
            weight
        )))
    }
}

fn dangling(id: EdgeId) -> HypergraphError {
    HypergraphError::IndexInconsistency(format!("edge id {} has no entry", id.0))
}

impl<N: NodeKey> fmt::Display for Hypergraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hypergraph with {} nodes and {} edges.",
            self.num_nodes(),
            self.edges.len()
        )?;
        write!(
            f,
            "Distribution of hyperedge sizes: {:?}",
            self.distribution_sizes()
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
