use std::sync::atomic::AtomicBool;
use std::time::Duration;

use qr_sensing::{
    run_scan_loop, BoundingBox, CaptureConfig, FrameSource, Lane, RecordingSink, ScanOptions,
    StubBackend, Symbol, SyntheticSource,
};

fn fast_options(max_iterations: u64) -> ScanOptions {
    ScanOptions {
        interval: Duration::from_millis(1),
        max_backoff: Duration::from_millis(4),
        max_iterations: Some(max_iterations),
    }
}

#[test]
fn quiet_frames_emit_nothing() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    let mut decoder = StubBackend::new();
    let mut sink = RecordingSink::new();
    let stop = AtomicBool::new(false);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &fast_options(5),
        &stop,
    )
    .expect("loop");

    assert!(sink.messages.is_empty());
}

#[test]
fn detections_emit_one_batch_per_frame() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    let mut decoder = StubBackend::new();
    // Frame 1: two codes. Frame 2: nothing. Frame 3: one code.
    decoder.push_symbols(vec![
        Symbol::qr("alpha", BoundingBox { x: 10, y: 0, w: 20, h: 20 }),
        Symbol::qr("beta", BoundingBox { x: 600, y: 0, w: 20, h: 20 }),
    ]);
    decoder.push_symbols(vec![]);
    decoder.push_symbols(vec![Symbol::qr(
        "gamma",
        BoundingBox { x: 300, y: 0, w: 20, h: 20 },
    )]);
    let mut sink = RecordingSink::new();
    let stop = AtomicBool::new(false);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &fast_options(3),
        &stop,
    )
    .expect("loop");

    assert_eq!(sink.messages.len(), 2);

    // Synthetic frames are 640 wide: boundaries sit at ~107 and ~533.
    let first = &sink.messages[0];
    assert_eq!(first.codes.len(), 2);
    assert_eq!(first.codes[0].location, Lane::Left);
    assert_eq!(
        first.codes[0].public_key,
        "-----BEGIN PUBLIC KEY-----\nalpha\n-----END PUBLIC KEY-----"
    );
    assert_eq!(first.codes[1].location, Lane::Right);

    let second = &sink.messages[1];
    assert_eq!(second.codes.len(), 1);
    assert_eq!(second.codes[0].location, Lane::Center);
}

#[test]
fn decode_failures_skip_the_frame() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    let mut decoder = StubBackend::new();
    decoder.push_error("simulated decoder fault");
    decoder.push_symbols(vec![Symbol::qr(
        "after-fault",
        BoundingBox { x: 300, y: 0, w: 20, h: 20 },
    )]);
    let mut sink = RecordingSink::new();
    let stop = AtomicBool::new(false);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &fast_options(2),
        &stop,
    )
    .expect("loop");

    // The faulted frame produced nothing; the next one still went out.
    assert_eq!(sink.messages.len(), 1);
    assert_eq!(
        sink.messages[0].codes[0].public_key,
        "-----BEGIN PUBLIC KEY-----\nafter-fault\n-----END PUBLIC KEY-----"
    );
}

#[test]
fn send_failures_back_off_and_recover() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    let mut decoder = StubBackend::new();
    for _ in 0..3 {
        decoder.push_symbols(vec![Symbol::qr(
            "retry-me",
            BoundingBox { x: 300, y: 0, w: 20, h: 20 },
        )]);
    }
    let mut sink = RecordingSink::new();
    sink.fail_next(2);
    let stop = AtomicBool::new(false);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &fast_options(3),
        &stop,
    )
    .expect("loop");

    // Two sends failed, the third frame's batch was delivered.
    assert_eq!(sink.messages.len(), 1);
}

#[test]
fn read_failures_back_off_and_capture_resumes() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    source.fail_next_reads(2);
    let mut decoder = StubBackend::new();
    decoder.push_symbols(vec![Symbol::qr(
        "after-outage",
        BoundingBox { x: 300, y: 0, w: 20, h: 20 },
    )]);
    let mut sink = RecordingSink::new();
    let stop = AtomicBool::new(false);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &fast_options(3),
        &stop,
    )
    .expect("loop");

    // Two reads failed; the loop kept going and the third frame's batch
    // was delivered.
    assert_eq!(source.stats().frames_captured, 1);
    assert_eq!(sink.messages.len(), 1);
    assert_eq!(
        sink.messages[0].codes[0].public_key,
        "-----BEGIN PUBLIC KEY-----\nafter-outage\n-----END PUBLIC KEY-----"
    );
}

#[test]
fn stop_flag_halts_the_loop() {
    let mut source = SyntheticSource::new(CaptureConfig::default());
    let mut decoder = StubBackend::new();
    let mut sink = RecordingSink::new();
    let stop = AtomicBool::new(true);

    run_scan_loop(
        &mut source,
        &mut decoder,
        &mut sink,
        &ScanOptions::default(),
        &stop,
    )
    .expect("loop");

    assert!(sink.messages.is_empty());
}
