//! Dispatcher integration tests (requires "worker" feature)
//!
//! Run with:
//! ```bash
//! cargo test -p wavmux --test dispatch_integration
//! ```

#![cfg(feature = "worker")]

mod helpers;

use helpers::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wavmux::prelude::*;
use wavmux::{pipeline, FixedProbe, ResourceRegistry};

/// Direct and offloaded paths produce byte-identical output.
#[test]
fn test_path_equivalence() {
    init_tracing();

    let configs = [
        stereo_capture(2048),
        stereo_capture(1500).with_desired_sample_rate(16000),
        EncodeConfig::mono(22050, chunked(&generate_sine(1000.0, 22050, 900), 128))
            .with_desired_sample_rate(44100),
    ];

    for config in configs {
        let direct = Dispatcher::direct().encode_blocking(config.clone()).unwrap();
        let offloaded = Dispatcher::offloaded()
            .encode_blocking(config.clone())
            .unwrap();
        assert_eq!(direct, offloaded);
        assert_eq!(direct, pipeline::run(&config).unwrap());
    }
}

/// The continuation receives both the bytes and a view over them.
#[test]
fn test_continuation_gets_bytes_and_view() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);

    let handle = Dispatcher::builder()
        .probe(FixedProbe(true))
        .build()
        .dispatch(stereo_capture(64), move |result| {
            let wav = result.unwrap();
            let view = wav.view();
            *sink.lock().unwrap() = Some((wav.len(), view.channels(), view.sample_rate()));
        });
    assert_eq!(handle.mode(), ExecutionMode::Offloaded);
    handle.wait();

    assert_eq!(
        *seen.lock().unwrap(),
        Some((44 + 64 * 2 * 2, 2, TEST_SAMPLE_RATE))
    );
}

/// Concurrent dispatches each own their worker resource.
#[test]
fn test_concurrent_encodes_release_every_resource() {
    let registry = ResourceRegistry::new();
    let dispatcher = Dispatcher::builder()
        .mode(ExecutionMode::Offloaded)
        .registry(registry.clone())
        .build();

    let delivered = Arc::new(AtomicUsize::new(0));
    let handles: Vec<ExecutionHandle> = (0..8)
        .map(|i| {
            let delivered = Arc::clone(&delivered);
            let config = stereo_capture(256 + i * 32);
            dispatcher.dispatch(config, move |result| {
                assert!(result.is_ok());
                delivered.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    while handles.iter().any(|h| !h.is_done()) {
        std::thread::yield_now();
    }

    assert_eq!(delivered.load(Ordering::SeqCst), 8);
    assert_eq!(registry.acquired(), 8);
    assert_eq!(registry.released(), 8);
    assert_eq!(registry.live(), 0);
}

/// Config errors cross the worker boundary unchanged.
#[test]
fn test_config_error_from_worker() {
    let config = stereo_capture(32).with_interleaved_length(31);
    let direct = Dispatcher::direct().encode_blocking(config.clone()).unwrap_err();
    let offloaded = Dispatcher::offloaded().encode_blocking(config).unwrap_err();
    assert_eq!(direct, offloaded);
    assert!(offloaded.is_config_error());
}
