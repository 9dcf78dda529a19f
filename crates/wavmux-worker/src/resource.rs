//! Scoped worker resources.
//!
//! Every offloaded encode holds one [`WorkerResource`] for as long as its
//! worker exists. The resource is released when the guard drops, which
//! happens exactly once whether the encode succeeded or failed.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    acquired: AtomicUsize,
    released: AtomicUsize,
    live: AtomicUsize,
}

/// Issues worker resources and counts their lifetimes.
///
/// Cloning shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    inner: Arc<RegistryInner>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a resource labelled `{prefix}-{id}`.
    pub fn acquire(&self, prefix: &str) -> WorkerResource {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.acquired.fetch_add(1, Ordering::AcqRel);
        self.inner.live.fetch_add(1, Ordering::AcqRel);
        let name = format!("{prefix}-{id}");
        debug!("Acquired worker resource {}", name);

        WorkerResource {
            id,
            name,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Total resources ever acquired
    pub fn acquired(&self) -> usize {
        self.inner.acquired.load(Ordering::Acquire)
    }

    /// Total resources released
    pub fn released(&self) -> usize {
        self.inner.released.load(Ordering::Acquire)
    }

    /// Resources currently held
    ///
    /// Counted separately so it stays consistent while other threads acquire
    /// and release.
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::Acquire)
    }
}

/// Guard for the resource backing one worker.
#[derive(Debug)]
pub struct WorkerResource {
    id: u64,
    name: String,
    registry: Arc<RegistryInner>,
}

impl WorkerResource {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Label of the resource, also used as the worker thread name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for WorkerResource {
    fn drop(&mut self) {
        self.registry.live.fetch_sub(1, Ordering::AcqRel);
        self.registry.released.fetch_add(1, Ordering::AcqRel);
        debug!("Released worker resource {}", self.name);
    }
}
