//! # wavmux - capture buffers to WAV
//!
//! Umbrella crate over the wavmux subsystems:
//! - **wavmux-core** - Merge, resample, interleave, 16-bit PCM WAV encoding
//! - **wavmux-worker** - Direct or offloaded execution behind one dispatcher
//!
//! ## Quick Start
//!
//! ```
//! use wavmux::prelude::*;
//!
//! let left = ChannelBuffers::from_chunks(vec![vec![0.0, 0.5], vec![0.25]]);
//! let right = ChannelBuffers::from_chunks(vec![vec![0.0, -0.5, -0.25]]);
//! let config = EncodeConfig::stereo(44100, left, right).with_desired_sample_rate(48000);
//!
//! let dispatcher = Dispatcher::builder().mode(ExecutionMode::Auto).build();
//! let wav = dispatcher.encode_blocking(config)?;
//! assert_eq!(wav.view().sample_rate(), 48000);
//! # Ok::<(), wavmux::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `worker` (default) - `Dispatcher` with direct and offloaded executors

/// Re-export of wavmux-core for direct access
pub use wavmux_core as core;

pub use wavmux_core::{
    dsp, pipeline, ByteRateMode, Channel, ChannelBuffers, EncodeConfig, EncodeOptions, Error,
    Result, WavBytes, WavView,
};

#[cfg(feature = "worker")]
pub use wavmux_worker as worker;

#[cfg(feature = "worker")]
pub use wavmux_worker::{
    CapabilityProbe, Dispatcher, DispatcherBuilder, ExecutionHandle, ExecutionMode,
    ExecutionState, FixedProbe, ResourceRegistry, SystemProbe,
};

/// Commonly used types
pub mod prelude {
    pub use wavmux_core::{
        ByteRateMode, ChannelBuffers, EncodeConfig, EncodeOptions, Error, Result, WavBytes,
        WavView,
    };

    #[cfg(feature = "worker")]
    pub use wavmux_worker::{Dispatcher, ExecutionHandle, ExecutionMode, ExecutionState};
}
