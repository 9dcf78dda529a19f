//! Merge → resample → interleave → encode.
//!
//! A pure function of its input: no I/O, no shared state, so the same
//! config always yields the same bytes no matter which thread runs it.

use crate::config::{Channel, EncodeConfig};
use crate::dsp::{interleave, merge, resample, resample_channels};
use crate::error::{Error, Result};
use crate::format::wav::{self, WavBytes};
use crate::options::EncodeOptions;
use tracing::debug;

/// Run the full pipeline with default [`EncodeOptions`].
pub fn run(config: &EncodeConfig) -> Result<WavBytes> {
    run_with_options(config, &EncodeOptions::default())
}

/// Run the full pipeline.
pub fn run_with_options(config: &EncodeConfig, options: &EncodeOptions) -> Result<WavBytes> {
    config.validate()?;

    let length = config.interleaved_length;
    let left = merge(&config.left, length, Channel::Left)?;

    let interleaved = match config.right {
        None => {
            if config.needs_resampling() {
                resample(&left, config.output_sample_rate(), config.sample_rate)?
            } else {
                left
            }
        }
        Some(ref right) => {
            let right = merge(right, length, Channel::Right)?;
            let (left, right) = if config.needs_resampling() {
                resample_channels(&left, &right, config.output_sample_rate(), config.sample_rate)?
            } else {
                (left, right)
            };
            interleave(&left, &right)?
        }
    };

    debug!(
        channels = config.channels,
        input_samples = length,
        output_samples = interleaved.len(),
        sample_rate = config.output_sample_rate(),
        "Encoding WAV"
    );

    wav::encode(
        &interleaved,
        config.channels,
        config.output_sample_rate(),
        options,
    )
}

/// Expected encoded size for `config`, without running the pipeline.
pub fn encoded_len(config: &EncodeConfig) -> Result<usize> {
    config.validate()?;
    let per_channel = if config.needs_resampling() && config.interleaved_length > 0 {
        let fit = crate::dsp::resample_len(
            config.interleaved_length,
            config.output_sample_rate(),
            config.sample_rate,
        );
        if fit == 0 {
            return Err(Error::ResampleDegenerate {
                input_len: config.interleaved_length,
                fit_count: fit,
            });
        }
        fit
    } else {
        config.interleaved_length
    };
    Ok(wav::HEADER_LEN + per_channel * config.channels as usize * 2)
}
