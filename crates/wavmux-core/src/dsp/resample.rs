//! Linear interpolation resampling
//!
//! Stretches or squeezes a channel onto `round(len * new / old)` points. The
//! first and last input samples land exactly on the first and last output
//! samples; everything in between is a weighted average of the two nearest
//! input samples.

use crate::error::{Error, Result};

/// Resample `data` from `old_rate` to `new_rate`.
///
/// - Equal rates return the input unchanged.
/// - Empty input returns empty output.
/// - If the output would hold a single sample, it is `data[0]`.
/// - If a non-empty input would shrink to zero samples, returns
///   [`Error::ResampleDegenerate`].
pub fn resample(data: &[f64], new_rate: u32, old_rate: u32) -> Result<Vec<f64>> {
    if new_rate == 0 {
        return Err(Error::InvalidSampleRate(new_rate));
    }
    if old_rate == 0 {
        return Err(Error::InvalidSampleRate(old_rate));
    }
    if new_rate == old_rate || data.is_empty() {
        return Ok(data.to_vec());
    }

    let fit_count = fit_count(data.len(), new_rate, old_rate);
    match fit_count {
        0 => {
            return Err(Error::ResampleDegenerate {
                input_len: data.len(),
                fit_count,
            })
        }
        1 => return Ok(vec![data[0]]),
        _ => {}
    }

    let last = data.len() - 1;
    let spring_factor = last as f64 / (fit_count - 1) as f64;

    let mut output = Vec::with_capacity(fit_count);
    output.push(data[0]);
    for i in 1..fit_count - 1 {
        let tmp = i as f64 * spring_factor;
        let before = (tmp.floor() as usize).min(last);
        let after = (tmp.ceil() as usize).min(last);
        let at_point = tmp - before as f64;
        output.push(linear_interpolate(data[before], data[after], at_point));
    }
    output.push(data[last]);

    Ok(output)
}

/// Resample both channels of a stereo pair, checking they stay the same length.
pub fn resample_channels(
    left: &[f64],
    right: &[f64],
    new_rate: u32,
    old_rate: u32,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if left.len() != right.len() {
        return Err(Error::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let left = resample(left, new_rate, old_rate)?;
    let right = resample(right, new_rate, old_rate)?;

    if left.len() != right.len() {
        return Err(Error::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    Ok((left, right))
}

/// Number of output samples for `len` input samples.
pub(crate) fn fit_count(len: usize, new_rate: u32, old_rate: u32) -> usize {
    (len as f64 * (new_rate as f64 / old_rate as f64)).round() as usize
}

#[inline]
fn linear_interpolate(before: f64, after: f64, at_point: f64) -> f64 {
    before + (after - before) * at_point
}
