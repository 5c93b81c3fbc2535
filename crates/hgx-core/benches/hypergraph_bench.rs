//! # Hypergraph Benchmarks
//!
//! Performance benchmarks for hgx-core store operations.
//!
//! Run with: `cargo bench -p hgx-core`

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use hgx_core::{EdgeFilter, Hypergraph, HypergraphConfig};
use std::hint::black_box;

/// Edge list of `count` overlapping edges of sizes 2..=5 over `count / 2`
/// nodes. Deterministic, no randomness.
fn edge_list(count: usize) -> Vec<Vec<u64>> {
    let domain = (count / 2).max(8) as u64;
    (0..count as u64)
        .map(|i| {
            let size = 2 + i % 4;
            (0..size).map(|k| (i * 7 + k * 13) % domain).collect()
        })
        .collect()
}

fn build(count: usize) -> Hypergraph<u64> {
    Hypergraph::from_edges(HypergraphConfig::new(), edge_list(count), None, None)
        .expect("build")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100, 1000, 10000].iter() {
        let edges = edge_list(*size);
        let weights = vec![1.0; edges.len()];

        group.bench_with_input(BenchmarkId::new("unweighted", size), &edges, |b, edges| {
            b.iter(|| {
                let mut hg: Hypergraph = Hypergraph::new();
                let _ = hg.add_edges(edges.clone(), None, None);
                black_box(hg)
            });
        });

        group.bench_with_input(BenchmarkId::new("weighted", size), &edges, |b, edges| {
            b.iter(|| {
                let mut hg: Hypergraph = Hypergraph::with_config(HypergraphConfig::weighted());
                let _ = hg.add_edges(edges.clone(), Some(&weights[..]), None);
                black_box(hg)
            });
        });
    }

    group.finish();
}

fn bench_incident_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("incident_queries");

    for size in [100, 1000, 10000].iter() {
        let hg = build(*size);

        group.bench_with_input(BenchmarkId::new("all", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.get_incident_edges(&0, EdgeFilter::All)));
        });

        group.bench_with_input(BenchmarkId::new("size_3", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.get_incident_edges(&0, EdgeFilter::size(3))));
        });

        group.bench_with_input(BenchmarkId::new("neighbors", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.get_neighbors(&0, EdgeFilter::All)));
        });
    }

    group.finish();
}

fn bench_filtered_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_counts");

    for size in [1000, 10000].iter() {
        let hg = build(*size);

        group.bench_with_input(BenchmarkId::new("num_edges_up_to", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.num_edges(EdgeFilter::order(2).up_to())));
        });

        group.bench_with_input(BenchmarkId::new("get_edges_order", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.get_edges(EdgeFilter::order(3)).map(|e| e.len())));
        });
    }

    group.finish();
}

fn bench_cascading_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascading_removal");

    for size in [100, 1000, 10000].iter() {
        let hg = build(*size);

        group.bench_with_input(BenchmarkId::new("drop_edges", size), &hg, |b, hg| {
            b.iter_batched(
                || hg.copy(),
                |mut hg| black_box(hg.remove_node(&0, false)),
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("keep_edges", size), &hg, |b, hg| {
            b.iter_batched(
                || hg.copy(),
                |mut hg| black_box(hg.remove_node(&0, true)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_subhypergraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("subhypergraph");

    for size in [100, 1000, 10000].iter() {
        let hg = build(*size);
        let half: Vec<u64> = hg.get_nodes().into_iter().step_by(2).collect();

        group.bench_with_input(BenchmarkId::new("by_nodes", size), &half, |b, nodes| {
            b.iter(|| black_box(hg.subhypergraph(nodes)));
        });

        group.bench_with_input(BenchmarkId::new("by_orders", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.subhypergraph_by_orders(&[1, 2], false)));
        });

        group.bench_with_input(BenchmarkId::new("components", size), &hg, |b, hg| {
            b.iter(|| black_box(hg.connected_components()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_edge_insertion,
    bench_incident_queries,
    bench_filtered_counts,
    bench_cascading_removal,
    bench_subhypergraph,
);

criterion_main!(benches);
