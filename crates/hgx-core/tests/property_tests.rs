//! # Property-Based Tests
//!
//! Index consistency, canonicalization and determinism under random
//! operation sequences.

use hgx_core::{Edge, EdgeFilter, Hypergraph, HypergraphConfig};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// A random member list: 1..6 members drawn from a small domain so that
/// edges overlap often.
fn members() -> impl Strategy<Value = Vec<u64>> {
    vec(0u64..20, 1..6)
}

#[derive(Debug, Clone)]
enum Op {
    AddEdge(Vec<u64>),
    RemoveEdge(usize),
    RemoveNode(u64, bool),
    AddNode(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => members().prop_map(Op::AddEdge),
        1 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => (0u64..20, any::<bool>()).prop_map(|(n, keep)| Op::RemoveNode(n, keep)),
        1 => (0u64..25).prop_map(Op::AddNode),
    ]
}

/// Apply an operation, ignoring not-found outcomes.
fn apply(hg: &mut Hypergraph<u64>, op: &Op) {
    match op {
        Op::AddEdge(m) => {
            hg.add_edge(m.clone(), None, None).expect("add edge");
        }
        Op::RemoveEdge(pick) => {
            let target = {
                let edges = hg.get_edges(EdgeFilter::All).expect("edges");
                if edges.is_empty() {
                    None
                } else {
                    Some(edges[pick % edges.len()].nodes().to_vec())
                }
            };
            if let Some(target) = target {
                assert!(hg.remove_edge(&target).expect("remove edge"));
            }
        }
        Op::RemoveNode(n, keep) => {
            if hg.check_node(n) {
                hg.remove_node(n, *keep).expect("remove node");
            }
        }
        Op::AddNode(n) => {
            hg.add_node(*n);
        }
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Any permutation of a member list denotes the same edge.
    #[test]
    fn canonical_form_ignores_order(mut m in members()) {
        let a = Edge::new(m.clone()).expect("edge");
        m.reverse();
        let b = Edge::new(m).expect("edge");
        prop_assert_eq!(&a, &b);
        prop_assert!(a.nodes().windows(2).all(|w| w[0] < w[1]));
    }

    /// An inserted then removed edge leaves no trace.
    #[test]
    fn insert_then_remove_leaves_no_index(edges in vec(members(), 1..20), pick in any::<usize>()) {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges(edges.clone(), None, None).expect("add");

        let target = edges[pick % edges.len()].clone();
        hg.remove_edge(&target).expect("remove");

        prop_assert!(!hg.check_edge(&target));
        let canonical = Edge::new(target).expect("edge");
        for node in canonical.nodes() {
            let incident = hg.get_incident_edges(node, EdgeFilter::All).expect("incident");
            prop_assert!(incident.iter().all(|e| **e != canonical));
        }
        prop_assert!(hg.verify_integrity().is_ok());
    }

    /// Counts always agree with enumeration.
    #[test]
    fn counts_match_enumeration(ops in vec(op(), 0..60)) {
        let mut hg: Hypergraph = Hypergraph::new();
        for op in &ops {
            apply(&mut hg, op);
        }
        prop_assert_eq!(hg.num_nodes(), hg.get_nodes().len());
        prop_assert_eq!(
            hg.num_edges(EdgeFilter::All).expect("count"),
            hg.get_edges(EdgeFilter::All).expect("edges").len()
        );
        let by_order: usize = hg.distribution_sizes().values().sum();
        prop_assert_eq!(by_order, hg.num_edges(EdgeFilter::All).expect("count"));
    }

    /// Incident edges are exactly the edges containing the node.
    #[test]
    fn incident_edges_exhaustive(ops in vec(op(), 0..60)) {
        let mut hg: Hypergraph = Hypergraph::new();
        for op in &ops {
            apply(&mut hg, op);
        }

        let all = hg.get_edges(EdgeFilter::All).expect("edges");
        for node in hg.get_nodes() {
            let incident: BTreeSet<&Edge<u64>> = hg
                .get_incident_edges(&node, EdgeFilter::All)
                .expect("incident")
                .into_iter()
                .collect();
            for edge in &all {
                prop_assert_eq!(edge.contains(&node), incident.contains(*edge));
            }
        }
    }

    /// Indices stay consistent under any operation sequence.
    #[test]
    fn integrity_after_random_ops(ops in vec(op(), 0..80)) {
        let mut hg: Hypergraph = Hypergraph::new();
        for op in &ops {
            apply(&mut hg, op);
            prop_assert!(hg.verify_integrity().is_ok());
        }
    }

    /// set_weight then get_weight returns the written value.
    #[test]
    fn weight_round_trip(m in members(), initial in -1.0e6f64..1.0e6, w in -1.0e6f64..1.0e6) {
        let mut hg = Hypergraph::with_config(HypergraphConfig::weighted());
        hg.add_edge(m.clone(), Some(initial), None).expect("add");
        hg.set_weight(&m, w).expect("set");
        prop_assert_eq!(hg.get_weight(&m).expect("get"), w);
    }

    /// Identical operation sequences yield identical stores.
    #[test]
    fn determinism(ops in vec(op(), 0..60)) {
        let mut a: Hypergraph = Hypergraph::new();
        let mut b: Hypergraph = Hypergraph::new();
        for op in &ops {
            apply(&mut a, op);
            apply(&mut b, op);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
        prop_assert_eq!(a.get_orders(), b.get_orders());
    }

    /// A subhypergraph only holds edges inside its node set.
    #[test]
    fn subhypergraph_edges_are_contained(edges in vec(members(), 1..20), keep in vec(0u64..20, 1..10)) {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges(edges, None, None).expect("add");
        let keep: Vec<u64> = keep.into_iter().filter(|n| hg.check_node(n)).collect();

        let sub = hg.subhypergraph(&keep).expect("sub");
        let allowed: BTreeSet<u64> = keep.iter().copied().collect();
        prop_assert_eq!(sub.get_nodes(), allowed.iter().copied().collect::<Vec<_>>());
        for edge in sub.get_edges(EdgeFilter::All).expect("edges") {
            prop_assert!(edge.nodes().iter().all(|n| allowed.contains(n)));
            prop_assert!(hg.check_edge(edge.nodes()));
        }
    }
}
