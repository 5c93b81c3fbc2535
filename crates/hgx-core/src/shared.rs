//! # Shared Store
//!
//! A cloneable handle for using one store from several threads: many
//! concurrent readers, one writer at a time. A writer holds the lock for the
//! whole mutation, so readers never observe half-updated indices.

use crate::graph::Hypergraph;
use crate::snapshot::HypergraphSnapshot;
use crate::types::NodeKey;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Thread-shareable `Hypergraph` handle.
#[derive(Debug)]
pub struct SharedHypergraph<N = u64> {
    inner: Arc<RwLock<Hypergraph<N>>>,
}

impl<N> Clone for SharedHypergraph<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: NodeKey> From<Hypergraph<N>> for SharedHypergraph<N> {
    fn from(hypergraph: Hypergraph<N>) -> Self {
        Self::new(hypergraph)
    }
}

impl<N: NodeKey> SharedHypergraph<N> {
    pub fn new(hypergraph: Hypergraph<N>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(hypergraph)),
        }
    }

    /// Shared read access. Blocks while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Hypergraph<N>> {
        self.inner.read()
    }

    /// Exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Hypergraph<N>> {
        self.inner.write()
    }

    /// Run `f` under the read lock.
    pub fn with_read<T>(&self, f: impl FnOnce(&Hypergraph<N>) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run `f` under the write lock.
    pub fn with_write<T>(&self, f: impl FnOnce(&mut Hypergraph<N>) -> T) -> T {
        f(&mut self.inner.write())
    }

    /// A consistent snapshot taken under the read lock.
    pub fn snapshot(&self) -> HypergraphSnapshot<N> {
        self.inner.read().snapshot()
    }

    /// An independent deep copy of the current state.
    pub fn copy(&self) -> Hypergraph<N> {
        self.inner.read().copy()
    }
}
