//! The capture/decode/emit loop.
//!
//! Each iteration pulls one frame, decodes it, classifies every symbol into
//! a lane, formats the envelopes, and emits the batch when it is non-empty.
//! Failures are classified by stage: decode failures skip the frame, read
//! and send failures back off exponentially before the next attempt. Any
//! successful iteration resets the backoff. The loop has no termination
//! condition of its own; it runs until the stop flag is raised.

use anyhow::Result;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::capture::FrameSource;
use crate::decode::DecoderBackend;
use crate::emit::EventSink;
use crate::envelope::{envelope, normalize_code, CodesMessage};
use crate::frame::Frame;
use crate::lane::classify;

/// Stage at which an iteration failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Read,
    Decode,
    Send,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FailureKind::Read => "read",
            FailureKind::Decode => "decode",
            FailureKind::Send => "send",
        };
        f.write_str(tag)
    }
}

/// Exponential backoff: starts at the base interval, doubles per
/// consecutive failure, saturates at the cap.
#[derive(Debug)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    current: Option<Duration>,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            current: None,
        }
    }

    /// Delay to apply after one more failure.
    pub fn next(&mut self) -> Duration {
        let next = match self.current {
            None => self.base,
            Some(current) => current.saturating_mul(2).min(self.max),
        };
        self.current = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Scan loop options.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Fixed sleep between iterations.
    pub interval: Duration,
    /// Backoff cap for consecutive read/send failures.
    pub max_backoff: Duration,
    /// Iteration cap; `None` runs until the stop flag is raised.
    pub max_iterations: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            max_iterations: None,
        }
    }
}

/// Decode one frame and build its outbound batch, in detection order.
///
/// Lane boundaries come from this frame's width, so sources may change
/// resolution between frames.
pub fn scan_frame(frame: &Frame, decoder: &mut dyn DecoderBackend) -> Result<CodesMessage> {
    let symbols = decoder.decode(frame)?;
    let mut codes = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let lane = classify(symbol.bbox.center_x(), frame.width());
        let normalized = normalize_code(&symbol.text);
        let preview: String = normalized.chars().take(25).collect();
        log::info!("sensed code to the {}: {}...", lane, preview);
        codes.push(envelope(&symbol.text, lane));
    }
    Ok(CodesMessage { codes })
}

enum Iteration {
    Emitted(usize),
    Quiet,
    Failed(FailureKind, anyhow::Error),
}

fn scan_iteration(
    source: &mut dyn FrameSource,
    decoder: &mut dyn DecoderBackend,
    sink: &mut dyn EventSink,
) -> Iteration {
    let frame = match source.next_frame() {
        Ok(frame) => frame,
        Err(err) => return Iteration::Failed(FailureKind::Read, err),
    };

    let batch = match scan_frame(&frame, decoder) {
        Ok(batch) => batch,
        Err(err) => return Iteration::Failed(FailureKind::Decode, err),
    };

    if batch.is_empty() {
        return Iteration::Quiet;
    }

    let count = batch.codes.len();
    match sink.emit(&batch) {
        Ok(()) => Iteration::Emitted(count),
        Err(err) => Iteration::Failed(FailureKind::Send, err),
    }
}

/// Run the scan loop until the stop flag is raised (or the iteration cap is
/// reached).
///
/// The capture handle and connection are owned by the caller and borrowed
/// for the duration of the run; nothing else touches them concurrently.
pub fn run_scan_loop(
    source: &mut dyn FrameSource,
    decoder: &mut dyn DecoderBackend,
    sink: &mut dyn EventSink,
    options: &ScanOptions,
    stop: &AtomicBool,
) -> Result<()> {
    source.connect()?;

    let mut backoff = Backoff::new(options.interval, options.max_backoff);
    let mut iterations = 0u64;
    let mut emitted = 0u64;

    while !stop.load(Ordering::Relaxed) {
        if let Some(cap) = options.max_iterations {
            if iterations >= cap {
                break;
            }
        }
        iterations += 1;

        let delay = match scan_iteration(source, decoder, sink) {
            Iteration::Emitted(count) => {
                emitted += 1;
                log::debug!("emitted batch #{} ({} codes)", emitted, count);
                backoff.reset();
                options.interval
            }
            Iteration::Quiet => {
                backoff.reset();
                options.interval
            }
            Iteration::Failed(FailureKind::Decode, err) => {
                // Skip the frame; decoding the next one is independent.
                log::warn!("decode failure, skipping frame: {}", err);
                options.interval
            }
            Iteration::Failed(kind, err) => {
                let delay = backoff.next();
                log::warn!("{} failure, retrying in {:?}: {}", kind, delay, err);
                delay
            }
        };

        if stop.load(Ordering::Relaxed) {
            break;
        }
        std::thread::sleep(delay);
    }

    let stats = source.stats();
    log::info!(
        "scan loop stopped after {} iterations ({} frames from {}, {} batches emitted)",
        iterations,
        stats.frames_captured,
        stats.source,
        emitted
    );
    Ok(())
}
