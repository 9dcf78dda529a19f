//! Executors: where the encode pipeline runs.
//!
//! Both executors run the same [`pipeline::run_with_options`], so for a given
//! config they produce the same bytes. They differ only in which thread does
//! the work and when the continuation fires.

use crate::handle::{Delivery, ExecutionHandle, ExecutionState, OnDone, StateCell};
use crate::resource::ResourceRegistry;
use crossbeam_channel::{bounded, Receiver, SendError};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
use wavmux_core::{pipeline, EncodeConfig, EncodeOptions, Error};

/// Default prefix for worker thread and resource names.
pub const DEFAULT_WORKER_NAME: &str = "wavmux-worker";

/// Execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Pick from host capabilities when the dispatcher is built.
    #[default]
    Auto,
    /// Run on the calling thread.
    Direct,
    /// Run on a dedicated worker thread.
    Offloaded,
}

/// Strategy for running one encode and delivering its result.
pub trait Executor: Send + Sync {
    /// Start encoding `config`; `on_done` receives the outcome exactly once.
    fn execute(
        &self,
        config: EncodeConfig,
        options: EncodeOptions,
        on_done: OnDone,
    ) -> ExecutionHandle;

    /// Mode this executor implements (never `Auto`).
    fn mode(&self) -> ExecutionMode;
}

/// Runs the pipeline synchronously on the caller's thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn execute(
        &self,
        config: EncodeConfig,
        options: EncodeOptions,
        on_done: OnDone,
    ) -> ExecutionHandle {
        debug!("Encoding on calling thread");
        on_done(pipeline::run_with_options(&config, &options));
        ExecutionHandle::completed(ExecutionMode::Direct)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Direct
    }
}

/// Body of a worker thread.
pub type WorkerBody = Box<dyn FnOnce() + Send + 'static>;

/// Starts worker threads.
pub trait WorkerSpawner: Send + Sync {
    fn spawn(&self, name: String, body: WorkerBody) -> io::Result<JoinHandle<()>>;
}

/// Spawns named OS threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSpawner;

impl WorkerSpawner for ThreadSpawner {
    fn spawn(&self, name: String, body: WorkerBody) -> io::Result<JoinHandle<()>> {
        thread::Builder::new().name(name).spawn(body)
    }
}

/// The message sent to a worker: everything it needs, by value, including
/// the continuation and the resource it releases.
struct Job {
    config: EncodeConfig,
    options: EncodeOptions,
    delivery: Delivery,
}

/// Runs each encode on its own short-lived worker thread.
///
/// Per call: acquire a worker resource, spawn the worker and send it the job
/// over a one-shot channel. The worker invokes the continuation itself and
/// then releases the resource, so the returned [`ExecutionHandle`] is only
/// needed to observe or join the encode.
#[derive(Clone)]
pub struct OffloadedExecutor {
    registry: ResourceRegistry,
    spawner: Arc<dyn WorkerSpawner>,
    name_prefix: String,
}

impl Default for OffloadedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl OffloadedExecutor {
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            spawner: Arc::new(ThreadSpawner),
            name_prefix: DEFAULT_WORKER_NAME.to_string(),
        }
    }

    /// Track worker resources in `registry`
    pub fn with_registry(mut self, registry: ResourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Start workers with `spawner`
    pub fn with_spawner(mut self, spawner: Arc<dyn WorkerSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Prefix for worker thread names
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }
}

impl Executor for OffloadedExecutor {
    fn execute(
        &self,
        config: EncodeConfig,
        options: EncodeOptions,
        on_done: OnDone,
    ) -> ExecutionHandle {
        let state = StateCell::new(ExecutionState::Created);
        let resource = self.registry.acquire(&self.name_prefix);
        let name = resource.name().to_string();
        let delivery = Delivery::new(on_done, resource, state.clone());
        let (job_tx, job_rx) = bounded::<Job>(1);

        let body: WorkerBody = Box::new(move || worker_loop(job_rx));
        let thread = match self.spawner.spawn(name.clone(), body) {
            Ok(thread) => thread,
            Err(e) => {
                warn!("Failed to spawn worker {}: {}", name, e);
                delivery.deliver(Err(Error::Environment(format!(
                    "failed to start worker: {e}"
                ))));
                return ExecutionHandle::completed(ExecutionMode::Offloaded);
            }
        };
        debug!("Worker {} {:?}", name, ExecutionState::Created);

        let job = Job {
            config,
            options,
            delivery,
        };
        if let Err(SendError(job)) = job_tx.send(job) {
            warn!("Worker {} dropped its job channel", name);
            job.delivery.deliver(Err(Error::Environment(
                "failed to transfer config to worker".into(),
            )));
            if thread.join().is_err() {
                warn!("Worker {} panicked", name);
            }
            return ExecutionHandle::completed(ExecutionMode::Offloaded);
        }

        state.mark_dispatched();
        debug!("Worker {} {:?}", name, state.get());
        ExecutionHandle::dispatched(state, thread)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Offloaded
    }
}

fn worker_loop(job_rx: Receiver<Job>) {
    let Ok(job) = job_rx.recv() else {
        return;
    };
    let result = pipeline::run_with_options(&job.config, &job.options);
    debug!("Worker {} encoded", job.delivery.worker_name());
    job.delivery.deliver(result);
}
