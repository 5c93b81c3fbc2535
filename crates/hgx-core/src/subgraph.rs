//! # Subhypergraph Derivation
//!
//! Every derived store is independent of its source: it has the same
//! configuration, copies of the retained weights and metadata, and edges in
//! the source's enumeration order.

use crate::graph::{EdgeId, Hypergraph};
use crate::query::EdgeFilter;
use crate::types::{HypergraphError, NodeKey};
use std::collections::BTreeSet;

impl<N: NodeKey> Hypergraph<N> {
    /// Restrict the store to a node subset.
    ///
    /// The result holds exactly the listed nodes and the edges whose members
    /// all belong to the list. Fails with `NodeNotFound` if a listed node is
    /// absent.
    pub fn subhypergraph(&self, nodes: &[N]) -> Result<Self, HypergraphError> {
        let keep: BTreeSet<&N> = nodes.iter().collect();

        let mut candidates = BTreeSet::new();
        for node in &keep {
            candidates.extend(self.node_entry(node)?.incident.iter().copied());
        }

        let mut sub = Self::with_config(self.config);
        for node in &keep {
            let metadata = self.node_entry(node)?.metadata.clone();
            sub.add_node_with_meta((*node).clone(), metadata);
        }
        for id in candidates {
            let entry = self.edge_entry(id)?;
            if entry.edge.nodes().iter().all(|n| keep.contains(n)) {
                sub.attach_edge(entry.edge.clone(), entry.weight, entry.metadata.clone());
            }
        }
        Ok(sub)
    }

    /// Keep the edges whose order is listed.
    ///
    /// With `keep_nodes == false` the node set is exactly the members of the
    /// retained edges; with `keep_nodes == true` every node is kept.
    pub fn subhypergraph_by_orders(
        &self,
        orders: &[usize],
        keep_nodes: bool,
    ) -> Result<Self, HypergraphError> {
        let mut ids = BTreeSet::new();
        for order in orders {
            if let Some(bucket) = self.edges_by_order.get(order) {
                ids.extend(bucket.iter().copied());
            }
        }
        self.derive(ids, keep_nodes)
    }

    /// Keep the edges whose size is listed. A size of 0 is `InvalidInput`.
    pub fn subhypergraph_by_sizes(
        &self,
        sizes: &[usize],
        keep_nodes: bool,
    ) -> Result<Self, HypergraphError> {
        let orders = sizes
            .iter()
            .map(|&size| {
                size.checked_sub(1).ok_or_else(|| {
                    HypergraphError::InvalidInput("edge size must be at least 1".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.subhypergraph_by_orders(&orders, keep_nodes)
    }

    /// The edges passing `filter`, as a new store.
    ///
    /// With `keep_isolated_nodes` every node of this store is carried over
    /// even if no retained edge touches it.
    pub fn get_edges_subhypergraph(
        &self,
        filter: EdgeFilter,
        keep_isolated_nodes: bool,
    ) -> Result<Self, HypergraphError> {
        let ids: BTreeSet<EdgeId> = self.filtered_ids(filter)?.into_iter().collect();
        self.derive(ids, keep_isolated_nodes)
    }

    /// Build a store from a set of edge ids of this one.
    fn derive(&self, ids: BTreeSet<EdgeId>, keep_nodes: bool) -> Result<Self, HypergraphError> {
        let mut sub = Self::with_config(self.config);
        if keep_nodes {
            for (node, entry) in &self.nodes {
                sub.add_node_with_meta(node.clone(), entry.metadata.clone());
            }
        }

        for id in ids {
            let entry = self.edge_entry(id)?;
            if !keep_nodes {
                for node in entry.edge.nodes() {
                    if !sub.check_node(node) {
                        let metadata = self.node_entry(node)?.metadata.clone();
                        sub.add_node_with_meta(node.clone(), metadata);
                    }
                }
            }
            sub.attach_edge(entry.edge.clone(), entry.weight, entry.metadata.clone());
        }
        Ok(sub)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HypergraphConfig;
    use crate::types::{Entity, MetaValue, metadata};

    fn sample() -> Hypergraph<u64> {
        Hypergraph::from_edges(
            HypergraphConfig::weighted(),
            [vec![1, 2], vec![2, 3], vec![4, 3, 5, 6, 8], vec![2, 3, 5, 6], vec![7, 4, 6]],
            Some(&[1.0, 2.0, 1.0, 3.0, 1.0][..]),
            None,
        )
        .expect("build")
    }

    #[test]
    fn subhypergraph_keeps_only_contained_edges() {
        let hg = sample();
        let sub = hg.subhypergraph(&[1, 2, 4]).expect("sub");

        assert_eq!(sub.get_nodes(), vec![1, 2, 4]);
        let edges = sub.get_edges(EdgeFilter::All).expect("edges");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].nodes(), &[1, 2]);
        assert_eq!(sub.get_weight(&[1, 2]).expect("weight"), 1.0);
        sub.verify_integrity().expect("integrity");
    }

    #[test]
    fn subhypergraph_unknown_node_fails() {
        let hg = sample();
        assert!(matches!(
            hg.subhypergraph(&[1, 99]),
            Err(HypergraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn subhypergraph_preserves_edge_order_and_metadata() {
        let mut hg = sample();
        let target = Entity::edge([2, 3]).expect("edge");
        hg.set_attr_meta(&target, "tag", "x").expect("set");
        hg.set_attr_meta(&Entity::Node(3), "color", "red").expect("set");

        let sub = hg.subhypergraph(&[3, 2, 1, 5, 6]).expect("sub");
        let rendered: Vec<String> = sub
            .get_edges(EdgeFilter::All)
            .expect("edges")
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(rendered, vec!["(1, 2)", "(2, 3)", "(2, 3, 5, 6)"]);
        assert_eq!(sub.get_attr_meta(&target, "tag").expect("attr"), &MetaValue::from("x"));
        assert_eq!(
            sub.get_attr_meta(&Entity::Node(3), "color").expect("attr"),
            &MetaValue::from("red")
        );
    }

    #[test]
    fn by_orders_drops_isolated_nodes() {
        let hg = sample();
        let sub = hg.subhypergraph_by_orders(&[1], false).expect("sub");
        assert_eq!(sub.get_nodes(), vec![1, 2, 3]);
        assert_eq!(sub.num_edges(EdgeFilter::All), Ok(2));

        let kept = hg.subhypergraph_by_orders(&[1], true).expect("sub");
        assert_eq!(kept.num_nodes(), 8);
        assert_eq!(kept.num_edges(EdgeFilter::All), Ok(2));
    }

    #[test]
    fn by_orders_ignores_unknown_orders() {
        let hg = sample();
        let sub = hg.subhypergraph_by_orders(&[9], false).expect("sub");
        assert_eq!(sub.num_nodes(), 0);
        assert_eq!(sub.num_edges(EdgeFilter::All), Ok(0));
    }

    #[test]
    fn by_sizes_matches_by_orders() {
        let hg = sample();
        let by_size = hg.subhypergraph_by_sizes(&[3, 5], false).expect("sub");
        let by_order = hg.subhypergraph_by_orders(&[2, 4], false).expect("sub");
        assert_eq!(by_size.get_nodes(), by_order.get_nodes());
        assert_eq!(
            by_size.get_edges(EdgeFilter::All).expect("edges"),
            by_order.get_edges(EdgeFilter::All).expect("edges")
        );
        assert!(hg.subhypergraph_by_sizes(&[0], false).is_err());
    }

    #[test]
    fn edges_subhypergraph_follows_filter() {
        let mut hg = sample();
        hg.add_node_with_meta(42, metadata([("lonely", true)]));

        let sub = hg
            .get_edges_subhypergraph(EdgeFilter::size(3).up_to(), false)
            .expect("sub");
        assert_eq!(sub.num_edges(EdgeFilter::All), Ok(3));
        assert!(!sub.check_node(&42));

        let with_isolated = hg
            .get_edges_subhypergraph(EdgeFilter::size(3).up_to(), true)
            .expect("sub");
        assert!(with_isolated.check_node(&42));
        assert_eq!(with_isolated.num_nodes(), 9);
    }

    #[test]
    fn derived_store_is_independent() {
        let hg = sample();
        let mut sub = hg.subhypergraph(&[1, 2, 3]).expect("sub");
        sub.remove_node(&2, false).expect("remove");
        assert!(hg.check_edge(&[1, 2]));
        assert!(hg.check_node(&2));
    }
}
