//! # Node Measures
//!
//! The degree of a node is the number of its incident edges passing a
//! filter. Degree correlation compares the per-size degree sequences.
//!
//! The eigenvector centralities (clique, Z and H) are defined on uniform,
//! connected hypergraphs only. They work on dense node codes from
//! `get_mapping` and start from the uniform vector, so repeated calls give
//! identical scores.

use crate::encoder::LabelEncoder;
use crate::graph::Hypergraph;
use crate::query::EdgeFilter;
use crate::types::{HypergraphError, NodeKey};
use nalgebra::{DMatrix, DVector};
use std::collections::BTreeMap;

impl<N: NodeKey> Hypergraph<N> {
    /// Degree of one node.
    pub fn degree(&self, node: &N, filter: EdgeFilter) -> Result<usize, HypergraphError> {
        let range = filter.order_range()?;
        let entry = self.node_entry(node)?;
        let Some(range) = range else {
            return Ok(entry.incident.len());
        };

        let mut degree = 0;
        for id in &entry.incident {
            if range.contains(&self.edge_entry(*id)?.edge.order()) {
                degree += 1;
            }
        }
        Ok(degree)
    }

    /// Degree of every node, keyed by node.
    pub fn degree_sequence(&self, filter: EdgeFilter) -> Result<BTreeMap<N, usize>, HypergraphError> {
        self.nodes
            .keys()
            .map(|node| Ok((node.clone(), self.degree(node, filter)?)))
            .collect()
    }

    /// Number of nodes per degree value.
    pub fn degree_distribution(
        &self,
        filter: EdgeFilter,
    ) -> Result<BTreeMap<usize, usize>, HypergraphError> {
        let mut distribution = BTreeMap::new();
        for degree in self.degree_sequence(filter)?.into_values() {
            *distribution.entry(degree).or_insert(0) += 1;
        }
        Ok(distribution)
    }

    /// Pearson correlation between the degree sequences of every pair of
    /// edge sizes `2..=max_size`.
    ///
    /// Row and column `i` stand for size `i + 2`. Each sequence covers all
    /// nodes in sorted order. A constant sequence has no defined
    /// correlation and yields `NaN`.
    pub fn degree_correlation(&self) -> Result<Vec<Vec<f64>>, HypergraphError> {
        let max_size = self.max_size().unwrap_or(0);
        let mut sequences = Vec::new();
        for size in 2..=max_size {
            let degrees = self.degree_sequence(EdgeFilter::size(size))?;
            let column = DVector::from_iterator(
                degrees.len(),
                degrees.into_values().map(|d| d as f64),
            );
            let mean = column.mean();
            sequences.push(column.add_scalar(-mean));
        }

        Ok(sequences
            .iter()
            .map(|a| sequences.iter().map(|b| pearson(a, b)).collect())
            .collect())
    }

    /// Clique eigenvector centrality.
    ///
    /// Dominant eigenvector of the clique-expansion adjacency matrix, where
    /// entry `(i, j)` counts the edges holding both `i` and `j`. Found by
    /// power iteration and scaled to unit Euclidean norm.
    pub fn cec_centrality(
        &self,
        tol: f64,
        max_iter: usize,
    ) -> Result<BTreeMap<N, f64>, HypergraphError> {
        let mapping = self.eigen_mapping(tol)?;
        let n = mapping.len();
        let mut adjacency = DMatrix::<f64>::zeros(n, n);
        for edge in self.get_edges(EdgeFilter::All)? {
            let codes = mapping.encode_edge(edge)?;
            for (k, &i) in codes.iter().enumerate() {
                for &j in &codes[k + 1..] {
                    adjacency[(i, j)] += 1.0;
                    adjacency[(j, i)] += 1.0;
                }
            }
        }

        let mut x = DVector::from_element(n, 1.0);
        x /= x.norm();
        for _ in 0..max_iter {
            let y = &adjacency * &x;
            let next = &y / y.norm();
            let residual = (&x - &next).norm();
            x = next;
            if residual <= tol {
                return Ok(scores(&mapping, &x));
            }
        }
        Err(not_converged("cec", max_iter))
    }

    /// Z-eigenvector centrality.
    ///
    /// Each step adds the product of an edge's scores to every member,
    /// then rescales the scores to sum to one.
    pub fn zec_centrality(
        &self,
        tol: f64,
        max_iter: usize,
    ) -> Result<BTreeMap<N, f64>, HypergraphError> {
        let mapping = self.eigen_mapping(tol)?;
        let edges = self.encoded_edges(&mapping)?;
        let iteration = Iteration { tol, max_iter, exponent: 1.0, measure: "zec" };
        tensor_iteration(&mapping, &edges, iteration, |x, codes, _| {
            codes.iter().map(|&c| x[c]).product()
        })
    }

    /// H-eigenvector centrality.
    ///
    /// Each member of an edge receives the product of the other members'
    /// scores; the sums are raised to `1 / (m - 1)` for edge size `m` and
    /// rescaled to sum to one.
    pub fn hec_centrality(
        &self,
        tol: f64,
        max_iter: usize,
    ) -> Result<BTreeMap<N, f64>, HypergraphError> {
        let mapping = self.eigen_mapping(tol)?;
        let edges = self.encoded_edges(&mapping)?;
        let exponent = 1.0 / self.max_order().unwrap_or(1) as f64;
        let iteration = Iteration { tol, max_iter, exponent, measure: "hec" };
        tensor_iteration(&mapping, &edges, iteration, |x, codes, k| {
            codes
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != k)
                .map(|(_, &j)| x[j])
                .product()
        })
    }

    /// Check the preconditions shared by the eigenvector centralities and
    /// encode the node set.
    fn eigen_mapping(&self, tol: f64) -> Result<LabelEncoder<N>, HypergraphError> {
        if !(tol.is_finite() && tol > 0.0) {
            return Err(HypergraphError::InvalidInput(format!(
                "tolerance must be a positive finite number, got {}",
                tol
            )));
        }
        if !self.is_uniform() {
            return Err(HypergraphError::InvalidInput(
                "centrality requires a uniform hypergraph".to_string(),
            ));
        }
        if !self.is_connected() {
            return Err(HypergraphError::InvalidInput(
                "centrality requires a connected hypergraph".to_string(),
            ));
        }
        if self.max_order().unwrap_or(0) == 0 {
            return Err(HypergraphError::InvalidInput(
                "centrality requires edges of size two or more".to_string(),
            ));
        }
        Ok(self.get_mapping())
    }

    fn encoded_edges(&self, mapping: &LabelEncoder<N>) -> Result<Vec<Vec<usize>>, HypergraphError> {
        self.get_edges(EdgeFilter::All)?
            .into_iter()
            .map(|edge| mapping.encode_edge(edge))
            .collect()
    }
}

/// Budget and post-processing for one edge-product iteration.
struct Iteration<'a> {
    tol: f64,
    max_iter: usize,
    /// Applied to every summed score before rescaling.
    exponent: f64,
    measure: &'a str,
}

/// Each step gives member `k` of every edge `edge_score(x, codes, k)`,
/// raises the sums to `exponent` and rescales them to sum to one.
fn tensor_iteration<N, F>(
    mapping: &LabelEncoder<N>,
    edges: &[Vec<usize>],
    iteration: Iteration<'_>,
    edge_score: F,
) -> Result<BTreeMap<N, f64>, HypergraphError>
where
    N: NodeKey,
    F: Fn(&DVector<f64>, &[usize], usize) -> f64,
{
    let n = mapping.len();
    let mut x = DVector::from_element(n, 1.0 / n as f64);
    for _ in 0..iteration.max_iter {
        let mut next = DVector::<f64>::zeros(n);
        for codes in edges {
            for (k, &i) in codes.iter().enumerate() {
                next[i] += edge_score(&x, codes, k);
            }
        }
        next.apply(|v| *v = v.powf(iteration.exponent));
        next /= next.sum();

        let residual = (&x - &next).norm();
        x = next;
        if residual <= iteration.tol {
            return Ok(scores(mapping, &x));
        }
    }
    Err(not_converged(iteration.measure, iteration.max_iter))
}

/// Correlation of two mean-centred sequences.
fn pearson(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return f64::NAN;
    }
    a.dot(b) / denominator
}

fn scores<N: NodeKey>(mapping: &LabelEncoder<N>, x: &DVector<f64>) -> BTreeMap<N, f64> {
    mapping
        .iter()
        .map(|(node, code)| (node.clone(), x[code]))
        .collect()
}

fn not_converged(measure: &str, iterations: usize) -> HypergraphError {
    tracing::warn!(measure, iterations, "power iteration did not converge");
    HypergraphError::NotConverged { iterations }
}
