//! Dispatcher: one entry point over both executors.

use crate::executor::{
    DirectExecutor, ExecutionMode, Executor, OffloadedExecutor, WorkerSpawner,
    DEFAULT_WORKER_NAME,
};
use crate::handle::ExecutionHandle;
use crate::probe::{CapabilityProbe, SystemProbe};
use crate::resource::ResourceRegistry;
use crossbeam_channel::bounded;
use std::sync::Arc;
use tracing::debug;
use wavmux_core::{EncodeConfig, EncodeOptions, Error, Result, WavBytes};

/// Runs encodes on an executor chosen once, at construction.
///
/// # Example
/// ```
/// use wavmux_core::{ChannelBuffers, EncodeConfig};
/// use wavmux_worker::{Dispatcher, ExecutionMode};
///
/// let dispatcher = Dispatcher::builder().mode(ExecutionMode::Direct).build();
/// let config = EncodeConfig::stereo(
///     8000,
///     ChannelBuffers::from_chunks(vec![vec![0.0, 0.5]]),
///     ChannelBuffers::from_chunks(vec![vec![0.0, -0.5]]),
/// );
///
/// dispatcher.dispatch(config, |result| {
///     let wav = result.unwrap();
///     assert_eq!(wav.len(), 52);
///     assert_eq!(wav.view().channels(), 2);
/// });
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn Executor>,
    options: EncodeOptions,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            options: EncodeOptions::default(),
        }
    }

    /// Dispatcher that always encodes on the calling thread.
    pub fn direct() -> Self {
        Self::new(Arc::new(DirectExecutor))
    }

    /// Dispatcher that always encodes on a worker thread.
    pub fn offloaded() -> Self {
        Self::new(Arc::new(OffloadedExecutor::new()))
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Resolved execution mode (never `Auto`).
    pub fn mode(&self) -> ExecutionMode {
        self.executor.mode()
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `config` and pass the outcome to `on_done`.
    ///
    /// Returns immediately for offloaded encodes; the worker calls `on_done`
    /// when the bytes are ready, whether or not the handle is kept.
    pub fn dispatch(
        &self,
        config: EncodeConfig,
        on_done: impl FnOnce(Result<WavBytes>) + Send + 'static,
    ) -> ExecutionHandle {
        self.executor.execute(config, self.options, Box::new(on_done))
    }

    /// Encode `config` and block until the bytes are available.
    pub fn encode_blocking(&self, config: EncodeConfig) -> Result<WavBytes> {
        let (tx, rx) = bounded(1);
        let handle = self.dispatch(config, move |result| {
            let _ = tx.send(result);
        });
        let result = rx.recv().unwrap_or_else(|_| {
            Err(Error::Environment(
                "encode finished without a result".into(),
            ))
        });
        handle.wait();
        result
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.mode())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder {
    mode: ExecutionMode,
    probe: Box<dyn CapabilityProbe>,
    options: EncodeOptions,
    worker_name: String,
    registry: ResourceRegistry,
    spawner: Option<Arc<dyn WorkerSpawner>>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            probe: Box::new(SystemProbe),
            options: EncodeOptions::default(),
            worker_name: DEFAULT_WORKER_NAME.to_string(),
            registry: ResourceRegistry::new(),
            spawner: None,
        }
    }
}

impl DispatcherBuilder {
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Capability check consulted when `mode` is `Auto`.
    pub fn probe(mut self, probe: impl CapabilityProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Prefix for worker thread names.
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Registry tracking worker resources.
    pub fn registry(mut self, registry: ResourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn spawner(mut self, spawner: Arc<dyn WorkerSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn build(self) -> Dispatcher {
        let mode = match self.mode {
            ExecutionMode::Auto if self.probe.supports_workers() => ExecutionMode::Offloaded,
            ExecutionMode::Auto => ExecutionMode::Direct,
            explicit => explicit,
        };
        debug!("Dispatcher mode {:?} (requested {:?})", mode, self.mode);

        let executor: Arc<dyn Executor> = match mode {
            ExecutionMode::Offloaded => {
                let mut executor = OffloadedExecutor::new()
                    .with_registry(self.registry)
                    .with_name_prefix(self.worker_name);
                if let Some(spawner) = self.spawner {
                    executor = executor.with_spawner(spawner);
                }
                Arc::new(executor)
            }
            _ => Arc::new(DirectExecutor),
        };

        Dispatcher {
            executor,
            options: self.options,
        }
    }
}
