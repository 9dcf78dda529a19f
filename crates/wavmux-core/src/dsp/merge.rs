//! Concatenation of chunked capture buffers.

use crate::config::{Channel, ChannelBuffers};
use crate::error::{Error, Result};

/// Concatenate `buffers` in order into one sequence of exactly `total_len` samples.
///
/// The chunk lengths must add up to `total_len`; a mismatch is reported
/// before anything is copied.
pub fn merge(buffers: &ChannelBuffers, total_len: usize, channel: Channel) -> Result<Vec<f64>> {
    let actual = buffers.total_len();
    if actual != total_len {
        return Err(Error::ChunkLengthMismatch {
            channel,
            expected: total_len,
            actual,
        });
    }

    let mut merged = Vec::with_capacity(total_len);
    for chunk in buffers.chunks() {
        merged.extend_from_slice(chunk);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_merge_in_order() {
        let buffers = ChannelBuffers::from_chunks(vec![vec![0.1, 0.2], vec![0.3], vec![0.4, 0.5]]);
        let merged = merge(&buffers, 5, Channel::Left).unwrap();
        assert_eq!(merged, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge(&ChannelBuffers::new(), 0, Channel::Left).unwrap();
        assert!(merged.is_empty());

        let buffers = ChannelBuffers::from_chunks(vec![vec![], vec![]]);
        assert!(merge(&buffers, 0, Channel::Right).unwrap().is_empty());
    }

    #[test]
    fn test_merge_rejects_short_total() {
        let buffers = ChannelBuffers::from_chunks(vec![vec![0.0; 4], vec![0.0; 4]]);
        let result = merge(&buffers, 6, Channel::Right);
        assert_eq!(
            result,
            Err(Error::ChunkLengthMismatch {
                channel: Channel::Right,
                expected: 6,
                actual: 8,
            })
        );
    }

    #[test]
    fn test_merge_rejects_long_total() {
        let buffers = ChannelBuffers::from_chunks(vec![vec![0.0; 3]]);
        assert!(merge(&buffers, 10, Channel::Left).is_err());
    }

    proptest! {
        #[test]
        fn prop_merge_restores_partitioned_sequence(
            data in prop::collection::vec(-1.0f64..=1.0, 0..256),
            cuts in prop::collection::vec(0usize..256, 0..8),
        ) {
            let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c.min(data.len())).collect();
            cuts.sort_unstable();

            let mut chunks = Vec::new();
            let mut start = 0;
            for cut in cuts {
                chunks.push(data[start..cut].to_vec());
                start = cut;
            }
            chunks.push(data[start..].to_vec());

            let merged = merge(&ChannelBuffers::from_chunks(chunks), data.len(), Channel::Left).unwrap();
            prop_assert_eq!(merged.len(), data.len());
            prop_assert_eq!(merged, data);
        }
    }
}
