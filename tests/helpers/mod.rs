//! Test helpers and fixtures for wavmux integration tests

#![allow(dead_code)]

use wavmux::prelude::*;

/// Default capture rate for fixtures
pub const TEST_SAMPLE_RATE: u32 = 48000;

/// Route `tracing` output through the test harness (`--nocapture` to see it).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// Generate a sine wave at `frequency` for `num_samples` samples.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * std::f64::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Split `samples` into capture-sized chunks.
pub fn chunked(samples: &[f64], chunk_size: usize) -> ChannelBuffers {
    ChannelBuffers::from_chunks(samples.chunks(chunk_size).map(<[f64]>::to_vec).collect())
}

/// Stereo sine capture: 440 Hz left, 660 Hz right, in 512-sample chunks.
pub fn stereo_capture(num_samples: usize) -> EncodeConfig {
    let left = generate_sine(440.0, TEST_SAMPLE_RATE, num_samples);
    let right = generate_sine(660.0, TEST_SAMPLE_RATE, num_samples);
    EncodeConfig::stereo(TEST_SAMPLE_RATE, chunked(&left, 512), chunked(&right, 512))
}

/// Parse `wav` with hound and return its spec and samples.
pub fn decode_with_hound(wav: &WavBytes) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::new(std::io::Cursor::new(wav.as_bytes()))
        .expect("hound should parse encoded WAV");
    let spec = reader.spec();
    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .expect("hound should decode samples");
    (spec, samples)
}
