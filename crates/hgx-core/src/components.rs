//! # Connectivity
//!
//! Connected components over the node-edge incidence structure, the
//! s-connected components of the edge set, and edge centralities on the
//! s-line graph.
//!
//! Traversals are breadth-first with `BTreeSet` visited sets, so component
//! contents and component order are deterministic: components are listed by
//! their smallest node (for node components) or their earliest edge (for
//! edge components).

use crate::graph::{EdgeId, Hypergraph};
use crate::types::{Edge, HypergraphError, NodeKey};
use rustworkx_core::centrality::{betweenness_centrality, closeness_centrality};
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Node count from which rustworkx would fan out over threads. Kept out of
/// reach so floating-point sums run in one fixed order.
const SEQUENTIAL: usize = usize::MAX;

impl<N: NodeKey> Hypergraph<N> {
    /// Node sets of the connected components.
    ///
    /// Two nodes are connected when some chain of edges links them. An
    /// isolated node forms its own component.
    #[must_use]
    pub fn connected_components(&self) -> Vec<BTreeSet<N>> {
        let mut visited: BTreeSet<&N> = BTreeSet::new();
        let mut components = Vec::new();

        for start in self.nodes.keys() {
            if !visited.insert(start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::new();
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                component.insert(current.clone());
                let Some(entry) = self.nodes.get(current) else {
                    continue;
                };
                for id in &entry.incident {
                    let Some(edge) = self.edges.get(id) else {
                        continue;
                    };
                    for member in edge.edge.nodes() {
                        if visited.insert(member) {
                            queue.push_back(member);
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// True iff the store has exactly one component.
    ///
    /// An empty store is not connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() == 1
    }

    /// The component with the most nodes; ties go to the earliest one.
    #[must_use]
    pub fn largest_component(&self) -> Option<BTreeSet<N>> {
        let mut largest: Option<BTreeSet<N>> = None;
        for component in self.connected_components() {
            if largest.as_ref().is_none_or(|l| component.len() > l.len()) {
                largest = Some(component);
            }
        }
        largest
    }

    /// The subhypergraph induced by the largest component.
    ///
    /// An empty store yields an empty store.
    pub fn subhypergraph_largest_component(&self) -> Result<Self, HypergraphError> {
        match self.largest_component() {
            Some(component) => {
                let nodes: Vec<N> = component.into_iter().collect();
                self.subhypergraph(&nodes)
            }
            None => Ok(Self::with_config(self.config)),
        }
    }

    /// Edge sets of the s-connected components.
    ///
    /// Two edges are s-adjacent when they share at least `s` nodes; an
    /// s-component is a maximal set of edges linked by chains of s-adjacent
    /// pairs. An edge with fewer than `s` members is a component on its own.
    /// Each component lists its edges in enumeration order.
    pub fn s_components(&self, s: usize) -> Result<Vec<Vec<&Edge<N>>>, HypergraphError> {
        if s == 0 {
            return Err(HypergraphError::InvalidInput(
                "s must be at least 1".to_string(),
            ));
        }

        let mut visited: BTreeSet<EdgeId> = BTreeSet::new();
        let mut components = Vec::new();

        for &start in self.edges.keys() {
            if !visited.insert(start) {
                continue;
            }
            let mut members = BTreeSet::new();
            let mut queue = VecDeque::new();
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                members.insert(current);
                let edge = &self.edge_entry(current)?.edge;
                for next in self.s_adjacent(edge, s)? {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }

            let edges = members
                .into_iter()
                .map(|id| self.edge_entry(id).map(|e| &e.edge))
                .collect::<Result<Vec<_>, _>>()?;
            components.push(edges);
        }
        Ok(components)
    }

    /// Normalized betweenness of every edge in the s-line graph.
    ///
    /// The s-line graph has one vertex per edge and links two edges that
    /// share at least `s` nodes. Endpoints are excluded from path counts.
    /// Results follow edge enumeration order.
    pub fn s_betweenness(&self, s: usize) -> Result<Vec<(&Edge<N>, f64)>, HypergraphError> {
        let (graph, edges) = self.s_line_graph(s)?;
        let scores = betweenness_centrality(&graph, false, true, SEQUENTIAL);
        Ok(pair_scores(edges, scores))
    }

    /// Closeness of every edge in the s-line graph, with the
    /// Wasserman-Faust correction for disconnected line graphs.
    pub fn s_closeness(&self, s: usize) -> Result<Vec<(&Edge<N>, f64)>, HypergraphError> {
        let (graph, edges) = self.s_line_graph(s)?;
        let scores = closeness_centrality(&graph, true);
        Ok(pair_scores(edges, scores))
    }

    /// Build the s-line graph. Vertex `i` stands for the `i`-th edge in
    /// enumeration order.
    fn s_line_graph(&self, s: usize) -> Result<(UnGraph<(), ()>, Vec<&Edge<N>>), HypergraphError> {
        if s == 0 {
            return Err(HypergraphError::InvalidInput(
                "s must be at least 1".to_string(),
            ));
        }

        let mut graph = UnGraph::<(), ()>::default();
        let mut vertex: BTreeMap<EdgeId, NodeIndex> = BTreeMap::new();
        let mut edges = Vec::with_capacity(self.edges.len());
        for (&id, entry) in &self.edges {
            vertex.insert(id, graph.add_node(()));
            edges.push(&entry.edge);
        }

        for (&id, entry) in &self.edges {
            for other in self.s_adjacent(&entry.edge, s)? {
                // each pair once, from its earlier edge
                if other <= id {
                    continue;
                }
                if let (Some(&a), Some(&b)) = (vertex.get(&id), vertex.get(&other)) {
                    graph.add_edge(a, b, ());
                }
            }
        }
        tracing::trace!(
            s,
            vertices = graph.node_count(),
            links = graph.edge_count(),
            "built s-line graph"
        );
        Ok((graph, edges))
    }

    /// Edges sharing at least `s` nodes with `edge`, excluding itself.
    fn s_adjacent(&self, edge: &Edge<N>, s: usize) -> Result<BTreeSet<EdgeId>, HypergraphError> {
        let mut adjacent = BTreeSet::new();
        if edge.size() < s {
            return Ok(adjacent);
        }
        for node in edge.nodes() {
            for &id in &self.node_entry(node)?.incident {
                if adjacent.contains(&id) {
                    continue;
                }
                let other = &self.edge_entry(id)?.edge;
                if other != edge && other.intersection_size(edge) >= s {
                    adjacent.insert(id);
                }
            }
        }
        Ok(adjacent)
    }
}

fn pair_scores<'a, N>(edges: Vec<&'a Edge<N>>, scores: Vec<Option<f64>>) -> Vec<(&'a Edge<N>, f64)> {
    edges
        .into_iter()
        .zip(scores)
        .filter_map(|(edge, score)| score.map(|value| (edge, value)))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::EdgeFilter;

    fn two_islands() -> Hypergraph<u64> {
        let mut hg = Hypergraph::new();
        hg.add_edges([vec![1, 2, 3], vec![3, 4], vec![10, 11]], None, None)
            .expect("add");
        hg.add_node(20);
        hg
    }

    #[test]
    fn components_are_sorted_by_smallest_node() {
        let hg = two_islands();
        let components = hg.connected_components();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(components[1].iter().copied().collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(components[2].iter().copied().collect::<Vec<_>>(), vec![20]);
    }

    #[test]
    fn connectivity() {
        let mut hg = two_islands();
        assert!(!hg.is_connected());

        hg.add_edge([4, 10, 20], None, None).expect("add");
        assert!(hg.is_connected());

        let empty: Hypergraph = Hypergraph::new();
        assert!(!empty.is_connected());
        assert_eq!(empty.largest_component(), None);
    }

    #[test]
    fn largest_component_and_its_subhypergraph() {
        let hg = two_islands();
        let largest = hg.largest_component().expect("largest");
        assert_eq!(largest.len(), 4);

        let sub = hg.subhypergraph_largest_component().expect("sub");
        assert_eq!(sub.get_nodes(), vec![1, 2, 3, 4]);
        assert_eq!(sub.num_edges(EdgeFilter::All), Ok(2));
    }

    #[test]
    fn largest_component_tie_goes_to_earliest() {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges([vec![5, 6], vec![1, 2]], None, None).expect("add");
        let largest = hg.largest_component().expect("largest");
        assert!(largest.contains(&1));
    }

    #[test]
    fn s_components_depend_on_overlap() {
        let mut hg: Hypergraph = Hypergraph::new();
        hg.add_edges(
            [vec![1, 2, 3], vec![2, 3, 4], vec![4, 5], vec![7, 8]],
            None,
            None,
        )
        .expect("add");

        let one = hg.s_components(1).expect("s=1");
        assert_eq!(one.len(), 2);
        assert_eq!(one[0].len(), 3);

        let two = hg.s_components(2).expect("s=2");
        let sizes: Vec<usize> = two.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
        assert_eq!(two[1][0].nodes(), &[4, 5]);
    }

    /// Edges [1,2,3] - [2,3,4] - [3,4,5] form a path in the 2-line graph;
    /// [7,8] hangs alone.
    fn chain() -> Hypergraph<u64> {
        let mut hg = Hypergraph::new();
        hg.add_edges(
            [vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5], vec![7, 8]],
            None,
            None,
        )
        .expect("add");
        hg
    }

    fn score(scores: &[(&Edge<u64>, f64)], members: &[u64]) -> f64 {
        scores
            .iter()
            .find(|(edge, _)| edge.nodes() == members)
            .map(|(_, value)| *value)
            .expect("scored edge")
    }

    #[test]
    fn s_betweenness_peaks_in_the_middle() {
        let hg = chain();
        let scores = hg.s_betweenness(2).expect("betweenness");
        assert_eq!(scores.len(), 4);
        assert_eq!(scores[0].0.nodes(), &[1, 2, 3]);

        // one of the three pairs among {0, 1, 2} routes through 1;
        // normalized by (n-1)(n-2)/2 = 3 for n = 4
        assert!((score(&scores, &[2, 3, 4]) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(score(&scores, &[1, 2, 3]), 0.0);
        assert_eq!(score(&scores, &[7, 8]), 0.0);
    }

    #[test]
    fn s_betweenness_vanishes_when_everything_is_adjacent() {
        let hg = chain();
        // at s = 1 the three overlapping edges form a triangle
        let scores = hg.s_betweenness(1).expect("betweenness");
        assert!(scores.iter().all(|(_, value)| *value == 0.0));
    }

    #[test]
    fn s_closeness_rewards_central_edges() {
        let hg = chain();
        let scores = hg.s_closeness(2).expect("closeness");
        let middle = score(&scores, &[2, 3, 4]);
        let end = score(&scores, &[1, 2, 3]);
        assert!(middle > end);
        assert!((score(&scores, &[1, 2, 3]) - score(&scores, &[3, 4, 5])).abs() < 1e-12);
        assert_eq!(score(&scores, &[7, 8]), 0.0);

        // reach 2 of 3 others at total distance 2, corrected by 2/3
        assert!((middle - (2.0 / 3.0) * (2.0 / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn s_line_graph_rejects_zero() {
        let hg = chain();
        assert!(matches!(
            hg.s_betweenness(0),
            Err(HypergraphError::InvalidInput(_))
        ));
        assert!(matches!(
            hg.s_closeness(0),
            Err(HypergraphError::InvalidInput(_))
        ));

        let empty: Hypergraph = Hypergraph::new();
        assert!(empty.s_closeness(1).expect("empty").is_empty());
    }

    #[test]
    fn s_components_rejects_zero() {
        let hg: Hypergraph = Hypergraph::new();
        assert!(matches!(
            hg.s_components(0),
            Err(HypergraphError::InvalidInput(_))
        ));
        assert_eq!(hg.s_components(1).expect("empty").len(), 0);
    }
}
