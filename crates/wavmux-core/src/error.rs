//! Error types for wavmux-core

use crate::config::Channel;
use thiserror::Error;

/// Encode error type
///
/// Every error belongs to a single encode call. Nothing is retried and no
/// partial output is produced when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Channel count other than 1 (mono) or 2 (stereo)
    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannelCount(u16),

    /// Sample rate of zero
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// Structurally invalid configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Chunk lengths of a channel do not add up to the declared length
    #[error("{channel} channel chunks hold {actual} samples, expected {expected}")]
    ChunkLengthMismatch {
        channel: Channel,
        expected: usize,
        actual: usize,
    },

    /// Left and right channels differ in length
    #[error("Left and right channels have different lengths ({left} vs {right})")]
    ChannelLengthMismatch { left: usize, right: usize },

    /// Resampling would produce no samples from a non-empty input
    #[error("Resampling {input_len} samples yields {fit_count} output samples")]
    ResampleDegenerate { input_len: usize, fit_count: usize },

    /// PCM payload does not fit the 32-bit RIFF size fields
    #[error("Data too large for WAV container: {0} bytes")]
    DataTooLarge(usize),

    /// Byte buffer is not a canonical 16-bit PCM WAV stream
    #[error("Invalid WAV data: {0}")]
    InvalidWav(String),

    /// Worker failed to start, or the message transfer failed
    #[error("Execution environment error: {0}")]
    Environment(String),
}

impl Error {
    /// Whether this error was caused by the encode configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedChannelCount(_)
                | Error::InvalidSampleRate(_)
                | Error::InvalidConfig(_)
                | Error::ChunkLengthMismatch { .. }
                | Error::ChannelLengthMismatch { .. }
        )
    }

    /// Whether this error came from the host environment rather than the data.
    pub fn is_environment_error(&self) -> bool {
        matches!(self, Error::Environment(_))
    }
}

/// Result type for encode operations
pub type Result<T> = std::result::Result<T, Error>;
