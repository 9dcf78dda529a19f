//! Encode options.

use serde::{Deserialize, Serialize};

/// How the `byte rate` field of the fmt chunk is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteRateMode {
    /// `sample_rate * block_align`, as the WAV format defines it.
    #[default]
    Standard,
    /// `sample_rate * 2` regardless of channel count.
    ///
    /// Matches files written by older recorders, whose readers may compare
    /// headers byte for byte. Identical to `Standard` for mono.
    Legacy,
}

/// Encoder options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Byte-rate field policy.
    pub byte_rate: ByteRateMode,
    /// Linear gain applied before quantization (1.0 = unity).
    pub gain: f64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            byte_rate: ByteRateMode::Standard,
            gain: 1.0,
        }
    }
}

impl EncodeOptions {
    pub fn byte_rate(mut self, mode: ByteRateMode) -> Self {
        self.byte_rate = mode;
        self
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Value of the byte-rate header field, or `None` if it overflows 32 bits.
    pub fn byte_rate_for(&self, sample_rate: u32, block_align: u16) -> Option<u32> {
        match self.byte_rate {
            ByteRateMode::Standard => sample_rate.checked_mul(block_align as u32),
            ByteRateMode::Legacy => sample_rate.checked_mul(2),
        }
    }
}
