//! QR lane-sensing scanner.
//!
//! Two independent pipelines share this crate:
//!
//! 1. The scanner: pull a frame from a video source, decode any barcodes in
//!    it, classify each detection into a horizontal lane, wrap the decoded
//!    text into the wire envelope, and publish the batch to a remote
//!    listener over a persistent connection. Driven by `scannerd`.
//! 2. The graph event generator: load or build a graph, synthesize random
//!    timestamped events for every node/neighbor pair, and write them to a
//!    JSON artifact. Driven by `graph_events`.
//!
//! # Module Structure
//!
//! - `frame`: grayscale frame buffer handed from capture to decode
//! - `capture`: frame sources (synthetic `stub://`, V4L2 devices)
//! - `decode`: decoder backends behind a registry
//! - `lane`: horizontal lane classification
//! - `envelope`: payload formatting and the outbound wire records
//! - `emit`: event sinks (MQTT publisher)
//! - `scanner`: the capture/decode/emit loop
//! - `config`: file + environment configuration
//! - `graph`: graph model and random event synthesis

pub mod capture;
pub mod config;
pub mod decode;
pub mod emit;
pub mod envelope;
pub mod frame;
pub mod graph;
pub mod lane;
pub mod scanner;

#[cfg(feature = "capture-v4l2")]
pub use capture::V4l2Source;
pub use capture::{CaptureConfig, FrameSource, SourceId, SourceStats, SyntheticSource};
pub use decode::{
    BoundingBox, DecoderBackend, DecoderRegistry, RqrrBackend, StubBackend, Symbol, SymbolKind,
};
pub use emit::{EventSink, MqttEmitter, MqttEmitterConfig, RecordingSink};
pub use envelope::{envelope, format_public_key, normalize_code, CodesMessage, QrCode};
pub use frame::Frame;
pub use lane::{classify, Lane};
pub use scanner::{run_scan_loop, scan_frame, Backoff, ScanOptions};
