//! Handle to a dispatched encode.

use crate::executor::ExecutionMode;
use crate::resource::WorkerResource;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, warn};
use wavmux_core::{Error, Result, WavBytes};

/// Continuation receiving the outcome of one encode.
pub type OnDone = Box<dyn FnOnce(Result<WavBytes>) + Send + 'static>;

/// Lifecycle of an encode.
///
/// `Created` is only held while the executor is still setting up the
/// worker, so a returned handle reports `Dispatched` or `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExecutionState {
    /// Worker and resource exist, config not yet sent.
    Created = 0,
    /// Config sent, the worker owns the encode.
    Dispatched = 1,
    /// Continuation invoked and resources released.
    Completed = 2,
}

impl ExecutionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ExecutionState::Created,
            1 => ExecutionState::Dispatched,
            _ => ExecutionState::Completed,
        }
    }
}

/// State shared between a handle and the worker delivering its result.
#[derive(Debug, Clone)]
pub(crate) struct StateCell(Arc<AtomicU8>);

impl StateCell {
    pub(crate) fn new(state: ExecutionState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    pub(crate) fn get(&self) -> ExecutionState {
        ExecutionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move `Created → Dispatched`; no-op once the encode has completed.
    pub(crate) fn mark_dispatched(&self) {
        let _ = self.0.compare_exchange(
            ExecutionState::Created as u8,
            ExecutionState::Dispatched as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    fn mark_completed(&self) {
        self.0
            .store(ExecutionState::Completed as u8, Ordering::Release);
    }
}

/// Pending continuation plus the resource it must release afterwards.
///
/// Travels to the worker with the job. Delivering consumes it; dropping it
/// undelivered (worker panicked or gave up) delivers an environment error,
/// so the continuation always runs exactly once.
pub(crate) struct Delivery {
    on_done: Option<OnDone>,
    resource: Option<WorkerResource>,
    state: StateCell,
}

impl Delivery {
    pub(crate) fn new(on_done: OnDone, resource: WorkerResource, state: StateCell) -> Self {
        Self {
            on_done: Some(on_done),
            resource: Some(resource),
            state,
        }
    }

    pub(crate) fn worker_name(&self) -> &str {
        self.resource.as_ref().map(|r| r.name()).unwrap_or("worker")
    }

    /// Invoke the continuation, then release the worker resource.
    pub(crate) fn deliver(mut self, result: Result<WavBytes>) {
        self.complete(result);
    }

    fn complete(&mut self, result: Result<WavBytes>) {
        let Some(on_done) = self.on_done.take() else {
            return;
        };

        if let Err(ref e) = result {
            if e.is_environment_error() {
                warn!("Worker {} failed: {}", self.worker_name(), e);
            }
        }
        on_done(result);

        if let Some(resource) = self.resource.take() {
            debug!("Worker {} completed", resource.name());
            drop(resource);
        }
        self.state.mark_completed();
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        self.complete(Err(Error::Environment(
            "worker exited without returning a result".into(),
        )));
    }
}

/// Handle to a dispatched encode.
///
/// The continuation does not depend on the handle: direct encodes have
/// delivered before the handle is returned, offloaded encodes deliver from
/// the worker thread as soon as the bytes are ready. The handle only
/// observes progress. [`wait()`](Self::wait) blocks until the worker has
/// delivered and exited; dropping the handle detaches it.
///
/// # Example
/// ```
/// use wavmux_core::{ChannelBuffers, EncodeConfig};
/// use wavmux_worker::Dispatcher;
///
/// let config = EncodeConfig::mono(8000, ChannelBuffers::from_chunks(vec![vec![0.0; 8]]));
/// let (tx, rx) = std::sync::mpsc::channel();
///
/// // Returns immediately; the worker calls the continuation.
/// Dispatcher::offloaded().dispatch(config, move |result| {
///     let _ = tx.send(result.map(|wav| wav.len()));
/// });
///
/// assert_eq!(rx.recv().unwrap().unwrap(), 60);
/// ```
pub struct ExecutionHandle {
    mode: ExecutionMode,
    state: StateCell,
    thread: Option<JoinHandle<()>>,
}

impl ExecutionHandle {
    pub(crate) fn completed(mode: ExecutionMode) -> Self {
        Self {
            mode,
            state: StateCell::new(ExecutionState::Completed),
            thread: None,
        }
    }

    pub(crate) fn dispatched(state: StateCell, thread: JoinHandle<()>) -> Self {
        Self {
            mode: ExecutionMode::Offloaded,
            state,
            thread: Some(thread),
        }
    }

    /// Executor that ran this encode.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Current state (non-blocking).
    pub fn state(&self) -> ExecutionState {
        self.state.get()
    }

    /// Check if the continuation has run and the resource is released.
    pub fn is_done(&self) -> bool {
        self.state() == ExecutionState::Completed
    }

    /// Block until the worker has delivered its result and exited.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Encode worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for ExecutionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionHandle")
            .field("mode", &self.mode)
            .field("state", &self.state())
            .finish()
    }
}
