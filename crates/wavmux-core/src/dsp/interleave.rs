//! Two-channel interleaving.

use crate::error::{Error, Result};

/// Combine two equal-length channels into `[L0, R0, L1, R1, ...]`.
pub fn interleave(left: &[f64], right: &[f64]) -> Result<Vec<f64>> {
    if left.len() != right.len() {
        return Err(Error::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let mut interleaved = Vec::with_capacity(left.len() + right.len());
    for (&l, &r) in left.iter().zip(right) {
        interleaved.push(l);
        interleaved.push(r);
    }

    Ok(interleaved)
}
