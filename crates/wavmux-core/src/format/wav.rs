//! 16-bit PCM WAV encoder
//!
//! Writes the canonical 44-byte header (RIFF, `fmt `, `data`) followed by
//! little-endian signed 16-bit samples. Samples are already interleaved.
//!
//! The header is written by hand rather than through `hound`: hound always
//! derives `byte_rate` from `sample_rate * block_align`, so
//! [`ByteRateMode::Legacy`](crate::ByteRateMode::Legacy) cannot be expressed
//! with it. hound is still used in the tests, as an independent reader of
//! the bytes produced here.

use crate::error::{Error, Result};
use crate::options::EncodeOptions;

/// Size of the canonical RIFF/WAVE header
pub const HEADER_LEN: usize = 44;

/// Bits per PCM sample
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: usize = 2;
const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// Encoded WAV file bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes {
    bytes: Vec<u8>,
}

impl WavBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Header accessor over these bytes.
    pub fn view(&self) -> WavView<'_> {
        // Built by `encode`, so the header is always well-formed.
        WavView { bytes: &self.bytes }
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<WavBytes> for Vec<u8> {
    fn from(wav: WavBytes) -> Self {
        wav.bytes
    }
}

/// Read-only field accessor over a canonical 16-bit PCM WAV stream.
#[derive(Debug, Clone, Copy)]
pub struct WavView<'a> {
    bytes: &'a [u8],
}

impl<'a> WavView<'a> {
    /// Check the chunk markers and sizes of `bytes`.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::InvalidWav(format!(
                "{} bytes is shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }

        for (offset, marker) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if &bytes[offset..offset + 4] != marker {
                return Err(Error::InvalidWav(format!(
                    "missing {:?} marker at offset {offset}",
                    String::from_utf8_lossy(marker)
                )));
            }
        }

        let view = Self { bytes };
        if view.bits_per_sample() != BITS_PER_SAMPLE {
            return Err(Error::InvalidWav(format!(
                "unsupported bit depth {}",
                view.bits_per_sample()
            )));
        }
        if HEADER_LEN + view.data_len() as usize != bytes.len() {
            return Err(Error::InvalidWav(format!(
                "data size {} does not match {} payload bytes",
                view.data_len(),
                bytes.len() - HEADER_LEN
            )));
        }

        Ok(view)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn riff_size(&self) -> u32 {
        self.u32_at(4)
    }

    pub fn audio_format(&self) -> u16 {
        self.u16_at(20)
    }

    pub fn channels(&self) -> u16 {
        self.u16_at(22)
    }

    pub fn sample_rate(&self) -> u32 {
        self.u32_at(24)
    }

    pub fn byte_rate(&self) -> u32 {
        self.u32_at(28)
    }

    pub fn block_align(&self) -> u16 {
        self.u16_at(32)
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.u16_at(34)
    }

    /// Size of the PCM payload in bytes
    pub fn data_len(&self) -> u32 {
        self.u32_at(40)
    }

    /// Number of 16-bit samples across all channels
    pub fn sample_count(&self) -> usize {
        (self.bytes.len() - HEADER_LEN) / BYTES_PER_SAMPLE
    }

    /// Interleaved sample at `index`
    pub fn sample(&self, index: usize) -> Option<i16> {
        let start = HEADER_LEN + index.checked_mul(BYTES_PER_SAMPLE)?;
        let pair = self.bytes.get(start..start + BYTES_PER_SAMPLE)?;
        Some(i16::from_le_bytes([pair[0], pair[1]]))
    }

    /// All interleaved samples in order
    pub fn samples(&self) -> impl Iterator<Item = i16> + 'a {
        self.bytes[HEADER_LEN..]
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }

    fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    fn u32_at(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        ])
    }
}

/// Encode interleaved samples to WAV in memory
///
/// # Arguments
/// * `samples` - Interleaved samples (normalized -1.0 to 1.0)
/// * `channels` - 1 (mono) or 2 (stereo)
/// * `sample_rate` - Sample rate written to the header
/// * `options` - Byte-rate policy and gain
pub fn encode(
    samples: &[f64],
    channels: u16,
    sample_rate: u32,
    options: &EncodeOptions,
) -> Result<WavBytes> {
    if channels != 1 && channels != 2 {
        return Err(Error::UnsupportedChannelCount(channels));
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    if channels == 2 && samples.len() % 2 != 0 {
        return Err(Error::ChannelLengthMismatch {
            left: samples.len().div_ceil(2),
            right: samples.len() / 2,
        });
    }

    let data_len = samples
        .len()
        .checked_mul(BYTES_PER_SAMPLE)
        .ok_or(Error::DataTooLarge(usize::MAX))?;
    let data_size = u32::try_from(data_len)
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or(Error::DataTooLarge(data_len))?;

    let block_align = channels * BYTES_PER_SAMPLE as u16;
    let byte_rate = options
        .byte_rate_for(sample_rate, block_align)
        .ok_or(Error::InvalidSampleRate(sample_rate))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data_len);

    // RIFF chunk descriptor
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    bytes.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());

    for &sample in samples {
        bytes.extend_from_slice(&float_to_i16(sample * options.gain).to_le_bytes());
    }

    debug_assert_eq!(bytes.len(), HEADER_LEN + data_len);
    Ok(WavBytes { bytes })
}

/// Convert float sample to 16-bit integer with clipping
///
/// The range is symmetric, so `-1.0` maps to `-32767`. NaN maps to 0.
#[inline]
pub fn float_to_i16(sample: f64) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0).round() as i16
}
