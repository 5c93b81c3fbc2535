//! # Store Configuration
//!
//! Policies fixed at construction time. Every field has a default so a
//! config table may be partial (or absent) in a TOML file.

use serde::{Deserialize, Serialize};

/// How removals react to a target that is not in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Fail with `NodeNotFound` / `EdgeNotFound`.
    #[default]
    Strict,
    /// Report `Ok(false)` and leave the store untouched.
    Ignore,
}

/// How `add_edge` treats an edge whose canonical form is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Last write wins: the new weight replaces the stored one.
    #[default]
    Overwrite,
    /// The new weight is added to the stored one.
    Accumulate,
    /// Fail with `DuplicateEdge`.
    Reject,
}

/// Construction-time configuration of a `Hypergraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HypergraphConfig {
    /// Every edge carries a weight.
    pub weighted: bool,
    /// Policy for removing absent nodes/edges.
    pub on_missing: MissingPolicy,
    /// Policy for re-inserting a stored edge.
    pub on_duplicate: DuplicatePolicy,
}

impl HypergraphConfig {
    /// Unweighted, strict, overwrite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted store with default policies.
    #[must_use]
    pub fn weighted() -> Self {
        Self {
            weighted: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }
}
