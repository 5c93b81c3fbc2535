//! # hgx-core
//!
//! The deterministic Hypergraph Store for hgx.
//!
//! A hypergraph generalizes a graph: an edge (hyperedge) joins any
//! non-empty set of nodes. This crate stores nodes and hyperedges with
//! optional weights and metadata, keeps incidence and order indices in step
//! with every mutation, and answers structural queries and subhypergraph
//! derivations.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network, no persistence engine
//! - Deterministic: `BTreeMap`/`BTreeSet` only, so identical call sequences
//!   yield identical results
//! - Nodes enumerate in sorted order, edges in insertion order
//! - No silent failures: every operation on an absent target returns an
//!   error (or `Ok(false)` under `MissingPolicy::Ignore` for removals)

// =============================================================================
// MODULES
// =============================================================================

pub mod components;
pub mod config;
pub mod encoder;
pub mod graph;
pub mod measures;
pub mod mutation;
pub mod query;
pub mod shared;
pub mod snapshot;
pub mod subgraph;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Edge, Entity, HypergraphError, MetaValue, Metadata, NodeKey, metadata};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use config::{DuplicatePolicy, HypergraphConfig, MissingPolicy};
pub use encoder::LabelEncoder;
pub use graph::Hypergraph;
pub use query::EdgeFilter;
pub use shared::SharedHypergraph;
pub use snapshot::{EdgeRecord, HypergraphSnapshot, NodeRecord};
