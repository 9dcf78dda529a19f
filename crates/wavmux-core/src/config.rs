//! Encode job types
//!
//! An [`EncodeConfig`] is a plain value: it carries every sample and rate the
//! pipeline needs, so it can be moved (or serialized) across a worker
//! boundary without capturing any surrounding state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel identifier, used to tag per-channel errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Left,
    Right,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => f.write_str("Left"),
            Channel::Right => f.write_str("Right"),
        }
    }
}

/// Ordered chunks of samples for one channel, as delivered by a capture source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelBuffers {
    chunks: Vec<Vec<f64>>,
}

impl ChannelBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chunks(chunks: Vec<Vec<f64>>) -> Self {
        Self { chunks }
    }

    /// Append a captured chunk
    pub fn push_chunk(&mut self, chunk: Vec<f64>) {
        self.chunks.push(chunk);
    }

    pub fn chunks(&self) -> &[Vec<f64>] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Sum of all chunk lengths
    pub fn total_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(Vec::is_empty)
    }
}

impl From<Vec<Vec<f64>>> for ChannelBuffers {
    fn from(chunks: Vec<Vec<f64>>) -> Self {
        Self::from_chunks(chunks)
    }
}

/// A complete encode job
///
/// # Example
/// ```
/// use wavmux_core::{ChannelBuffers, EncodeConfig};
///
/// let config = EncodeConfig::stereo(
///     8000,
///     ChannelBuffers::from_chunks(vec![vec![0.0, 0.5]]),
///     ChannelBuffers::from_chunks(vec![vec![0.0, -0.5]]),
/// )
/// .with_desired_sample_rate(16000);
///
/// assert_eq!(config.interleaved_length, 2);
/// assert!(config.needs_resampling());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Left (or only) channel chunks
    pub left: ChannelBuffers,
    /// Right channel chunks, present iff `channels == 2`
    pub right: Option<ChannelBuffers>,
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Output sample rate (None = keep capture rate)
    pub desired_sample_rate: Option<u32>,
    /// Total samples per channel across all chunks
    pub interleaved_length: usize,
}

impl EncodeConfig {
    /// Mono job; `interleaved_length` is taken from the buffers.
    pub fn mono(sample_rate: u32, left: ChannelBuffers) -> Self {
        Self {
            channels: 1,
            interleaved_length: left.total_len(),
            left,
            right: None,
            sample_rate,
            desired_sample_rate: None,
        }
    }

    /// Stereo job; `interleaved_length` is taken from the left buffers.
    pub fn stereo(sample_rate: u32, left: ChannelBuffers, right: ChannelBuffers) -> Self {
        Self {
            channels: 2,
            interleaved_length: left.total_len(),
            left,
            right: Some(right),
            sample_rate,
            desired_sample_rate: None,
        }
    }

    /// Resample to `rate` before encoding
    pub fn with_desired_sample_rate(mut self, rate: u32) -> Self {
        self.desired_sample_rate = Some(rate);
        self
    }

    /// Override the declared per-channel sample count.
    ///
    /// Capture sources usually track this count themselves; [`validate`](Self::validate)
    /// rejects the job if it disagrees with the buffers.
    pub fn with_interleaved_length(mut self, length: usize) -> Self {
        self.interleaved_length = length;
        self
    }

    /// Effective output sample rate
    pub fn output_sample_rate(&self) -> u32 {
        self.desired_sample_rate.unwrap_or(self.sample_rate)
    }

    /// Whether resampling is needed
    pub fn needs_resampling(&self) -> bool {
        self.desired_sample_rate
            .map(|r| r != self.sample_rate)
            .unwrap_or(false)
    }

    /// Check every structural invariant, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.channels != 1 && self.channels != 2 {
            return Err(Error::UnsupportedChannelCount(self.channels));
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if let Some(0) = self.desired_sample_rate {
            return Err(Error::InvalidSampleRate(0));
        }

        match (self.channels, &self.right) {
            (1, Some(_)) => {
                return Err(Error::InvalidConfig(
                    "Mono config must not carry right channel buffers".into(),
                ))
            }
            (2, None) => {
                return Err(Error::InvalidConfig(
                    "Stereo config is missing right channel buffers".into(),
                ))
            }
            _ => {}
        }

        check_length(Channel::Left, &self.left, self.interleaved_length)?;
        if let Some(ref right) = self.right {
            check_length(Channel::Right, right, self.interleaved_length)?;
        }

        Ok(())
    }
}

fn check_length(channel: Channel, buffers: &ChannelBuffers, expected: usize) -> Result<()> {
    let actual = buffers.total_len();
    if actual != expected {
        return Err(Error::ChunkLengthMismatch {
            channel,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(data: &[&[f64]]) -> ChannelBuffers {
        ChannelBuffers::from_chunks(data.iter().map(|c| c.to_vec()).collect())
    }

    #[test]
    fn test_channel_buffers_total_len() {
        let mut buffers = chunks(&[&[0.1, 0.2], &[], &[0.3]]);
        assert_eq!(buffers.chunk_count(), 3);
        assert_eq!(buffers.total_len(), 3);

        buffers.push_chunk(vec![0.4; 5]);
        assert_eq!(buffers.total_len(), 8);
        assert!(!buffers.is_empty());
        assert!(ChannelBuffers::new().is_empty());
    }

    #[test]
    fn test_constructors_derive_length() {
        let config = EncodeConfig::mono(44100, chunks(&[&[0.0; 10], &[0.0; 6]]));
        assert_eq!(config.interleaved_length, 16);
        assert_eq!(config.output_sample_rate(), 44100);
        assert!(!config.needs_resampling());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_desired_rate_is_not_resampling() {
        let config = EncodeConfig::mono(48000, chunks(&[&[0.0]])).with_desired_sample_rate(48000);
        assert!(!config.needs_resampling());
        assert_eq!(config.output_sample_rate(), 48000);
    }

    #[test]
    fn test_validate_channel_count() {
        let mut config = EncodeConfig::mono(44100, chunks(&[&[0.0]]));
        config.channels = 3;
        assert_eq!(config.validate(), Err(Error::UnsupportedChannelCount(3)));
    }

    #[test]
    fn test_validate_zero_rates() {
        let config = EncodeConfig::mono(0, chunks(&[&[0.0]]));
        assert_eq!(config.validate(), Err(Error::InvalidSampleRate(0)));

        let config = EncodeConfig::mono(8000, chunks(&[&[0.0]])).with_desired_sample_rate(0);
        assert_eq!(config.validate(), Err(Error::InvalidSampleRate(0)));
    }

    #[test]
    fn test_validate_right_presence() {
        let mut config = EncodeConfig::mono(8000, chunks(&[&[0.0]]));
        config.right = Some(chunks(&[&[0.0]]));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = EncodeConfig::stereo(8000, chunks(&[&[0.0]]), chunks(&[&[0.0]]));
        config.right = None;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let config = EncodeConfig::stereo(8000, chunks(&[&[0.0, 0.1]]), chunks(&[&[0.0]]));
        assert_eq!(
            config.validate(),
            Err(Error::ChunkLengthMismatch {
                channel: Channel::Right,
                expected: 2,
                actual: 1,
            })
        );

        let config = EncodeConfig::mono(8000, chunks(&[&[0.0, 0.1]])).with_interleaved_length(3);
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Left channel chunks hold 2 samples, expected 3"
        );
    }

    #[test]
    fn test_config_is_transferable_as_json() {
        let config = EncodeConfig::stereo(
            22050,
            chunks(&[&[0.25, -0.25], &[0.5]]),
            chunks(&[&[0.0], &[1.0, -1.0]]),
        )
        .with_desired_sample_rate(44100);

        let json = serde_json::to_string(&config).unwrap();
        let decoded: EncodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
