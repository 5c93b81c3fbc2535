//! # Batch Mutations
//!
//! Batch forms of the node/edge operations.
//!
//! Batches are applied item by item in the caller's order. Argument shape
//! problems (length mismatches, weight mode) are rejected before anything is
//! touched. An item failure stops the batch with
//! `HypergraphError::BatchFailed { index, .. }`; items before `index` stay
//! applied.

use crate::graph::Hypergraph;
use crate::types::{Edge, HypergraphError, Metadata, NodeKey};

impl<N: NodeKey> Hypergraph<N> {
    /// Insert every node not yet present. Returns how many were new.
    pub fn add_nodes<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = N>,
    {
        nodes
            .into_iter()
            .filter(|node| self.add_node(node.clone()))
            .count()
    }

    /// Insert a list of edges.
    ///
    /// `weights` and `metadata`, when given, are parallel to `edges`.
    /// Returns the canonical form of each inserted edge.
    pub fn add_edges<E, I>(
        &mut self,
        edges: E,
        weights: Option<&[f64]>,
        metadata: Option<&[Metadata]>,
    ) -> Result<Vec<Edge<N>>, HypergraphError>
    where
        E: IntoIterator<Item = I>,
        I: IntoIterator<Item = N>,
    {
        let edges: Vec<Vec<N>> = edges
            .into_iter()
            .map(|members| members.into_iter().collect())
            .collect();

        match (self.config.weighted, weights) {
            (true, None) if !edges.is_empty() => {
                return Err(HypergraphError::InvalidInput(
                    "a weighted hypergraph requires a weight list".to_string(),
                ));
            }
            (false, Some(_)) => return Err(HypergraphError::NotWeighted),
            _ => {}
        }
        if let Some(w) = weights {
            check_len("weights", w.len(), edges.len())?;
        }
        if let Some(m) = metadata {
            check_len("metadata", m.len(), edges.len())?;
        }

        let mut inserted = Vec::with_capacity(edges.len());
        for (index, members) in edges.into_iter().enumerate() {
            let weight = weights.and_then(|w| w.get(index).copied());
            let meta = metadata.and_then(|m| m.get(index).cloned());
            match self.add_edge(members, weight, meta) {
                Ok(edge) => inserted.push(edge),
                Err(e) => {
                    tracing::warn!(index, error = %e, "add_edges stopped");
                    return Err(HypergraphError::at(index, e));
                }
            }
        }
        Ok(inserted)
    }

    /// Remove a list of edges. Returns how many were removed.
    pub fn remove_edges<E>(&mut self, edges: E) -> Result<usize, HypergraphError>
    where
        E: IntoIterator,
        E::Item: AsRef<[N]>,
    {
        let mut removed = 0;
        for (index, members) in edges.into_iter().enumerate() {
            match self.remove_edge(members.as_ref()) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(index, error = %e, "remove_edges stopped");
                    return Err(HypergraphError::at(index, e));
                }
            }
        }
        Ok(removed)
    }

    /// Remove a list of nodes, one at a time in the given order.
    ///
    /// Cascading effects are identical to calling `remove_node` for each id
    /// in sequence. Returns how many nodes were removed.
    pub fn remove_nodes<'a, I>(&mut self, nodes: I, keep_edges: bool) -> Result<usize, HypergraphError>
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut removed = 0;
        for (index, node) in nodes.into_iter().enumerate() {
            match self.remove_node(node, keep_edges) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(index, error = %e, "remove_nodes stopped");
                    return Err(HypergraphError::at(index, e));
                }
            }
        }
        Ok(removed)
    }
}

fn check_len(what: &str, got: usize, expected: usize) -> Result<(), HypergraphError> {
    if got == expected {
        Ok(())
    } else {
        Err(HypergraphError::InvalidInput(format!(
            "{} list has {} entries for {} edges",
            what, got, expected
        )))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HypergraphConfig, MissingPolicy};
    use crate::query::EdgeFilter;
    use crate::types::metadata;

    #[test]
    fn add_nodes_counts_new_ids() {
        let mut hg: Hypergraph = Hypergraph::new();
        assert_eq!(hg.add_nodes([1, 2, 2, 3]), 3);
        assert_eq!(hg.add_nodes([3, 4]), 1);
        assert_eq!(hg.get_nodes(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn add_edges_returns_canonical_forms() {
        let mut hg: Hypergraph = Hypergraph::new();
        let edges = hg
            .add_edges([vec![2, 1], vec![5, 4, 3]], None, None)
            .expect("add");
        assert_eq!(edges[0].nodes(), &[1, 2]);
        assert_eq!(edges[1].nodes(), &[3, 4, 5]);
    }

    #[test]
    fn add_edges_rejects_length_mismatch_before_mutating() {
        let mut hg: Hypergraph = Hypergraph::with_config(HypergraphConfig::weighted());
        let result = hg.add_edges([vec![1, 2], vec![2, 3]], Some(&[1.0][..]), None);
        assert!(matches!(result, Err(HypergraphError::InvalidInput(_))));
        assert_eq!(hg.num_nodes(), 0);

        let result = hg.add_edges(
            [vec![1, 2]],
            Some(&[1.0][..]),
            Some(&[Metadata::new(), Metadata::new()][..]),
        );
        assert!(matches!(result, Err(HypergraphError::InvalidInput(_))));
    }

    #[test]
    fn add_edges_weight_mode() {
        let mut weighted: Hypergraph = Hypergraph::with_config(HypergraphConfig::weighted());
        assert!(weighted.add_edges([vec![1, 2]], None, None).is_err());

        let mut unweighted: Hypergraph = Hypergraph::new();
        assert_eq!(
            unweighted.add_edges([vec![1, 2]], Some(&[1.0][..]), None),
            Err(HypergraphError::NotWeighted)
        );
    }

    #[test]
    fn add_edges_reports_offending_item() {
        let mut hg: Hypergraph = Hypergraph::new();
        let result = hg.add_edges([vec![1, 2], vec![], vec![3, 4]], None, None);

        assert!(matches!(
            result,
            Err(HypergraphError::BatchFailed { index: 1, .. })
        ));
        if let Err(HypergraphError::BatchFailed { source, .. }) = result {
            assert!(matches!(*source, HypergraphError::InvalidInput(_)));
        }
        // Items before the failure stay applied
        assert!(hg.check_edge(&[1, 2]));
        assert!(!hg.check_edge(&[3, 4]));
    }

    #[test]
    fn empty_batch_needs_no_weights() {
        let mut hg: Hypergraph = Hypergraph::with_config(HypergraphConfig::weighted());
        let inserted = hg
            .add_edges(Vec::<Vec<u64>>::new(), None, None)
            .expect("empty batch");
        assert!(inserted.is_empty());

        let built = Hypergraph::<u64>::from_edges(
            HypergraphConfig::weighted(),
            Vec::<Vec<u64>>::new(),
            None,
            None,
        )
        .expect("empty store");
        assert_eq!(built.num_edges(EdgeFilter::All), Ok(0));
        assert!(built.is_weighted());
    }

    #[test]
    fn add_edges_attaches_metadata() {
        let mut hg: Hypergraph = Hypergraph::new();
        let meta = [metadata([("label", "a")]), metadata([("label", "b")])];
        hg.add_edges([vec![1, 2], vec![2, 3]], None, Some(&meta[..]))
            .expect("add");

        let tagged = hg.get_edges_with_meta(EdgeFilter::All).expect("edges");
        assert_eq!(tagged[1].1.get("label").and_then(|v| v.as_str()), Some("b"));
    }

    #[test]
    fn remove_edges_batch() {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges([vec![1, 2], vec![2, 3], vec![3, 4]], None, None)
            .expect("add");

        let removed = hg.remove_edges([vec![2, 1], vec![4, 3]]).expect("remove");
        assert_eq!(removed, 2);
        assert_eq!(hg.num_edges(EdgeFilter::All), Ok(1));

        let result = hg.remove_edges([vec![2, 3], vec![9, 9]]);
        assert!(matches!(result, Err(HypergraphError::BatchFailed { index: 1, .. })));
        assert_eq!(hg.num_edges(EdgeFilter::All), Ok(0));
    }

    #[test]
    fn remove_nodes_follows_input_order() {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges([vec![1, 2, 3], vec![1, 3]], None, None)
            .expect("add");

        // Removing 2 first rewrites (1,2,3) into (1,3), which collapses into the
        // existing edge; removing 1 then leaves the singleton (3).
        let removed = hg.remove_nodes(&[2, 1], true).expect("remove");
        assert_eq!(removed, 2);
        assert_eq!(hg.get_nodes(), vec![3]);
        assert!(hg.check_edge(&[3]));
        assert_eq!(hg.num_edges(EdgeFilter::All), Ok(1));
        hg.verify_integrity().expect("integrity");
    }

    #[test]
    fn remove_nodes_with_ignore_policy_skips_missing() {
        let mut hg: Hypergraph = Hypergraph::with_config(
            HypergraphConfig::new().with_missing_policy(MissingPolicy::Ignore),
        );
        hg.add_nodes([1, 2]);
        assert_eq!(hg.remove_nodes(&[1, 5, 2], false), Ok(2));
        assert_eq!(hg.num_nodes(), 0);
    }
}
