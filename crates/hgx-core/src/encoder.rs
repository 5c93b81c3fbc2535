//! # Label Encoder
//!
//! Bijection between a node-id domain and the dense range `0..n`.
//!
//! Classes are kept sorted, so encoding the same node set always yields the
//! same codes regardless of insertion history.

use crate::types::{Edge, HypergraphError, NodeKey, describe};

/// Dense integer encoding of a set of node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder<N> {
    /// Sorted, duplicate-free; a class's position is its code.
    classes: Vec<N>,
}

impl<N: NodeKey> LabelEncoder<N> {
    /// Fit an encoder to a collection of node ids.
    pub fn fit<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut classes: Vec<N> = nodes.into_iter().collect();
        classes.sort_unstable();
        classes.dedup();
        Self { classes }
    }

    /// The code of `node`.
    pub fn transform(&self, node: &N) -> Result<usize, HypergraphError> {
        self.classes
            .binary_search(node)
            .map_err(|_| HypergraphError::NodeNotFound(describe(node)))
    }

    /// The node with code `code`.
    pub fn inverse_transform(&self, code: usize) -> Result<&N, HypergraphError> {
        self.classes.get(code).ok_or_else(|| {
            HypergraphError::NodeNotFound(format!(
                "code {} (encoder has {} classes)",
                code,
                self.classes.len()
            ))
        })
    }

    /// Encode every member of an edge.
    pub fn encode_edge(&self, edge: &Edge<N>) -> Result<Vec<usize>, HypergraphError> {
        edge.nodes().iter().map(|n| self.transform(n)).collect()
    }

    /// The encoded domain, in code order.
    #[must_use]
    pub fn classes(&self) -> &[N] {
        &self.classes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// `(node, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, usize)> + '_ {
        self.classes.iter().enumerate().map(|(code, node)| (node, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_sorts_and_dedups() {
        let encoder = LabelEncoder::fit([5, 1, 3, 1]);
        assert_eq!(encoder.classes(), &[1, 3, 5]);
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn transform_round_trip() {
        let encoder = LabelEncoder::fit([10, 20, 30]);
        for (node, code) in encoder.iter() {
            assert_eq!(encoder.transform(node), Ok(code));
            assert_eq!(encoder.inverse_transform(code), Ok(node));
        }
    }

    #[test]
    fn unknown_lookups_fail() {
        let encoder = LabelEncoder::fit([1, 2]);
        assert!(encoder.transform(&7).is_err());
        assert!(encoder.inverse_transform(2).is_err());
    }

    #[test]
    fn encode_edge_uses_codes() {
        let encoder = LabelEncoder::fit(["a", "c", "b"]);
        let edge = Edge::new(["c", "a"]).expect("edge");
        assert_eq!(encoder.encode_edge(&edge), Ok(vec![0, 2]));
    }

    #[test]
    fn empty_encoder() {
        let encoder = LabelEncoder::<u64>::fit(Vec::new());
        assert!(encoder.is_empty());
    }
}
