//! Frame capture sources.
//!
//! Sources produce `Frame` instances for the scan loop:
//! - Synthetic source (`stub://` identifiers, testing)
//! - V4L2 devices (feature: capture-v4l2)
//!
//! The video source identifier comes from configuration as free text: a
//! numeric string selects a device index, anything else is treated as a
//! device path. That numeric-or-path fallback is deliberate; it is the only
//! parsing the identifier gets.

use anyhow::{anyhow, Result};

use crate::frame::Frame;

#[cfg(feature = "capture-v4l2")]
mod normalize;
#[cfg(feature = "capture-v4l2")]
pub mod v4l2;

#[cfg(feature = "capture-v4l2")]
pub use v4l2::V4l2Source;

/// Configuration for a capture source.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Raw source identifier (index, path, or `stub://` name).
    pub source: String,
    /// Target frame rate. Device sources may decimate to this rate.
    pub target_fps: u32,
    /// Preferred frame width.
    pub width: u32,
    /// Preferred frame height.
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: "stub://scanner".to_string(),
            target_fps: 10,
            width: 640,
            height: 480,
        }
    }
}

/// Parsed video source identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceId {
    /// Numeric device index (e.g. `0` for /dev/video0).
    Index(u32),
    /// Device path or scheme-prefixed identifier, passed through unchanged.
    Path(String),
}

impl SourceId {
    /// Parse an identifier. Numeric conversion is attempted first; on
    /// failure the string passes through as a path.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(index) => SourceId::Index(index),
            Err(_) => SourceId::Path(raw.to_string()),
        }
    }

    /// Device node this identifier names.
    pub fn device_path(&self) -> String {
        match self {
            SourceId::Index(index) => format!("/dev/video{}", index),
            SourceId::Path(path) => path.clone(),
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, SourceId::Path(path) if path.starts_with("stub://"))
    }
}

/// Statistics for a capture source.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_captured: u64,
    pub source: String,
}

/// Frame source trait.
///
/// `next_frame` blocks until a frame is available. Sources own their
/// capture handle exclusively; the scan loop borrows the source for its
/// whole run.
pub trait FrameSource: Send {
    /// Open the underlying device or stream.
    fn connect(&mut self) -> Result<()>;

    /// Capture the next frame (blocking).
    fn next_frame(&mut self) -> Result<Frame>;

    /// Check if the source is healthy.
    fn is_healthy(&self) -> bool {
        true
    }

    /// Get frame statistics.
    fn stats(&self) -> SourceStats;
}

/// Open the source a configuration names.
///
/// `stub://` identifiers always resolve to the synthetic source; anything
/// else needs the capture-v4l2 feature.
pub fn open_source(config: &CaptureConfig) -> Result<Box<dyn FrameSource>> {
    let id = SourceId::parse(&config.source);
    if id.is_stub() {
        return Ok(Box::new(SyntheticSource::new(config.clone())));
    }
    #[cfg(feature = "capture-v4l2")]
    {
        Ok(Box::new(V4l2Source::new(config.clone())?))
    }
    #[cfg(not(feature = "capture-v4l2"))]
    {
        Err(anyhow!(
            "source '{}' requires the capture-v4l2 feature",
            config.source
        ))
    }
}

// ----------------------------------------------------------------------------
// Synthetic source (stub://) for tests
// ----------------------------------------------------------------------------

/// Synthetic frame source.
///
/// Generates a deterministic luma pattern that shifts every frame, so
/// consecutive frames differ without any device attached.
pub struct SyntheticSource {
    config: CaptureConfig,
    frame_count: u64,
    connected: bool,
    fail_next: u32,
}

impl SyntheticSource {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            connected: false,
            fail_next: 0,
        }
    }

    /// Make the next `count` reads fail.
    pub fn fail_next_reads(&mut self, count: u32) {
        self.fail_next = count;
    }

    fn generate_pixels(&self) -> Vec<u8> {
        let pixel_count = (self.config.width * self.config.height) as usize;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count) % 256) as u8;
        }
        pixels
    }
}

impl FrameSource for SyntheticSource {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        log::info!("SyntheticSource: connected to {}", self.config.source);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame> {
        if !self.connected {
            return Err(anyhow!("synthetic source not connected"));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(anyhow!("synthetic read failed"));
        }
        self.frame_count += 1;
        Frame::new(
            self.generate_pixels(),
            self.config.width,
            self.config.height,
            self.frame_count,
        )
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frame_count,
            source: self.config.source.clone(),
        }
    }
}
