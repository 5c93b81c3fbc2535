//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the store:
//! - Node keys (`NodeKey`) and canonical hyperedges (`Edge`)
//! - Metadata bags (`MetaValue`, `Metadata`, `Entity`)
//! - Error types (`HypergraphError`)
//!
//! ## Determinism Guarantees
//!
//! - Every key type implements `Ord`, so the store can use `BTreeMap`/`BTreeSet`
//! - An `Edge` is always sorted and deduplicated; two edges with the same
//!   member set compare equal regardless of the order they were written in

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// NODE KEYS
// =============================================================================

/// Requirements for a node identifier.
///
/// Any totally-ordered, cloneable, printable type qualifies: integers,
/// strings, tuples of those.
pub trait NodeKey: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> NodeKey for T {}

/// Render a node key for error messages.
pub(crate) fn describe<N: fmt::Debug>(node: &N) -> String {
    format!("{:?}", node)
}

// =============================================================================
// EDGE
// =============================================================================

/// A hyperedge in canonical form.
///
/// The member list is sorted and free of duplicates, and never empty.
/// `order = size - 1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Edge<N>(Vec<N>);

impl<N: NodeKey> Edge<N> {
    /// Canonicalize a member list into an edge.
    ///
    /// Returns `HypergraphError::InvalidInput` if no member is given.
    pub fn new<I>(members: I) -> Result<Self, HypergraphError>
    where
        I: IntoIterator<Item = N>,
    {
        let mut nodes: Vec<N> = members.into_iter().collect();
        if nodes.is_empty() {
            return Err(HypergraphError::InvalidInput(
                "an edge must contain at least one node".to_string(),
            ));
        }
        nodes.sort_unstable();
        nodes.dedup();
        Ok(Self(nodes))
    }

    /// Canonicalize a borrowed member slice.
    pub fn from_slice(members: &[N]) -> Result<Self, HypergraphError> {
        Self::new(members.iter().cloned())
    }

    /// Members in ascending order.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.0
    }

    /// Number of members.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Size minus one.
    #[must_use]
    pub fn order(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Check membership in O(log size).
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.0.binary_search(node).is_ok()
    }

    /// The same edge with `node` dropped, or `None` if nothing would remain.
    #[must_use]
    pub fn without(&self, node: &N) -> Option<Self> {
        let rest: Vec<N> = self.0.iter().filter(|n| *n != node).cloned().collect();
        if rest.is_empty() { None } else { Some(Self(rest)) }
    }

    /// Number of members shared with `other`.
    ///
    /// Both member lists are sorted, so this is a single merge walk.
    #[must_use]
    pub fn intersection_size(&self, other: &Self) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Jaccard similarity: |a ∩ b| / |a ∪ b|.
    #[must_use]
    pub fn jaccard_similarity(&self, other: &Self) -> f64 {
        let shared = self.intersection_size(other);
        let union = self.size() + other.size() - shared;
        shared as f64 / union as f64
    }

    /// Jaccard distance: 1 - similarity.
    #[must_use]
    pub fn jaccard_distance(&self, other: &Self) -> f64 {
        1.0 - self.jaccard_similarity(other)
    }

    /// Consume the edge, returning its sorted members.
    #[must_use]
    pub fn into_nodes(self) -> Vec<N> {
        self.0
    }
}

impl<N: fmt::Debug> fmt::Display for Edge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", node)?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// METADATA
// =============================================================================

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl MetaValue {
    /// Borrow the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric payload as `f64`, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Attribute bag attached to a node or an edge.
pub type Metadata = BTreeMap<String, MetaValue>;

/// Build a metadata bag from key/value pairs.
pub fn metadata<I, K, V>(pairs: I) -> Metadata
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<MetaValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Address of a metadata bag: a node id or a canonical edge.
///
/// Nodes and edges are separate namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity<N> {
    Node(N),
    Edge(Edge<N>),
}

impl<N: NodeKey> Entity<N> {
    /// Address an edge by its members (any order).
    pub fn edge<I>(members: I) -> Result<Self, HypergraphError>
    where
        I: IntoIterator<Item = N>,
    {
        Edge::new(members).map(Self::Edge)
    }
}

impl<N> From<Edge<N>> for Entity<N> {
    fn from(edge: Edge<N>) -> Self {
        Self::Edge(edge)
    }
}

impl<N: fmt::Debug> fmt::Display for Entity<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "node {:?}", n),
            Self::Edge(e) => write!(f, "edge {}", e),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the hypergraph store.
///
/// - No silent failures: every absent lookup is reported
/// - The store never panics; indices are never left half-updated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HypergraphError {
    /// The requested node is not in the store.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The requested edge is not in the store.
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// The object exists but carries no such attribute.
    #[error("Attribute '{attribute}' not found for {object}")]
    AttributeNotFound { object: String, attribute: String },

    /// A weight operation was issued against an unweighted store.
    #[error("Hypergraph is not weighted")]
    NotWeighted,

    /// Malformed input: empty edge, mismatched lengths, bad filter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Duplicate insertion under `DuplicatePolicy::Reject`.
    #[error("Duplicate edge rejected: {0}")]
    DuplicateEdge(String),

    /// A batch stopped at `index`; earlier items remain applied.
    #[error("Batch operation failed at item {index}: {source}")]
    BatchFailed {
        index: usize,
        #[source]
        source: Box<HypergraphError>,
    },

    /// An iterative measure did not settle within its iteration budget.
    #[error("No convergence after {iterations} iterations")]
    NotConverged { iterations: usize },

    /// Internal indices disagree with the edge set.
    #[error("Index inconsistency: {0}")]
    IndexInconsistency(String),
}

impl HypergraphError {
    /// True for the `NotFound` class (node, edge, attribute).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NodeNotFound(_) | Self::EdgeNotFound(_) | Self::AttributeNotFound { .. } => true,
            Self::BatchFailed { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Wrap an item failure with its batch position.
    pub(crate) fn at(index: usize, source: HypergraphError) -> Self {
        Self::BatchFailed {
            index,
            source: Box::new(source),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
