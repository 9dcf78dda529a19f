//! Host capability checks.

/// Read-only view of what the host can do.
pub trait CapabilityProbe: Send + Sync {
    /// Whether encodes can run on a separate worker thread.
    fn supports_workers(&self) -> bool;
}

/// Probe backed by the running system.
///
/// Workers are worth it only if more than one thread can run in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl CapabilityProbe for SystemProbe {
    fn supports_workers(&self) -> bool {
        std::thread::available_parallelism()
            .map(|n| n.get() > 1)
            .unwrap_or(false)
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl CapabilityProbe for FixedProbe {
    fn supports_workers(&self) -> bool {
        self.0
    }
}
