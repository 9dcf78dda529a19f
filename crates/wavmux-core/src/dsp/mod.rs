//! Sample-domain stages of the encode pipeline.

mod interleave;
mod merge;
mod resample;

pub use interleave::interleave;
pub use merge::merge;
pub use resample::{resample, resample_channels};
pub(crate) use resample::fit_count as resample_len;
