//! # wavmux core
//!
//! Turns chunked per-channel capture buffers into a 16-bit PCM WAV byte stream:
//! - **Merge**: concatenate each channel's chunks
//! - **Resample**: optional linear-interpolation rate change
//! - **Interleave**: `[L0, R0, L1, R1, ...]` for stereo
//! - **Encode**: canonical 44-byte header plus little-endian samples
//!
//! ```
//! use wavmux_core::{pipeline, ChannelBuffers, EncodeConfig};
//!
//! let config = EncodeConfig::mono(8000, ChannelBuffers::from_chunks(vec![vec![0.0, 0.5]]));
//! let wav = pipeline::run(&config)?;
//! assert_eq!(wav.len(), 48);
//! # Ok::<(), wavmux_core::Error>(())
//! ```
//!
//! Everything here is synchronous and pure. Running it off-thread is the job
//! of `wavmux-worker`.

pub mod config;
pub mod dsp;
pub mod error;
pub mod format;
mod options;
pub mod pipeline;

pub use config::{Channel, ChannelBuffers, EncodeConfig};
pub use error::{Error, Result};
pub use format::wav::{WavBytes, WavView};
pub use options::{ByteRateMode, EncodeOptions};
