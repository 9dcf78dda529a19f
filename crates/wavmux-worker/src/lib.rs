//! # wavmux worker
//!
//! Runs the wavmux encode pipeline either on the calling thread or on an
//! isolated worker thread, behind one [`Dispatcher`]:
//!
//! - **`DirectExecutor`**: synchronous; the continuation fires before
//!   `dispatch` returns
//! - **`OffloadedExecutor`**: one worker thread per encode; the config goes
//!   in over a one-shot channel and the worker calls the continuation
//!   itself, nothing is shared
//!
//! The executor is picked once when the dispatcher is built, either
//! explicitly or from a [`CapabilityProbe`]. Both produce identical bytes.

#![forbid(unsafe_code)]

mod dispatcher;
mod executor;
mod handle;
mod probe;
mod resource;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use executor::{
    DirectExecutor, ExecutionMode, Executor, OffloadedExecutor, ThreadSpawner, WorkerBody,
    WorkerSpawner, DEFAULT_WORKER_NAME,
};
pub use handle::{ExecutionHandle, ExecutionState, OnDone};
pub use probe::{CapabilityProbe, FixedProbe, SystemProbe};
pub use resource::{ResourceRegistry, WorkerResource};
