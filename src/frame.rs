//! Grayscale frame buffer.
//!
//! A `Frame` is the unit of work handed from a capture source to the
//! decoder: one 8-bit luma plane plus its dimensions. Frames are ephemeral;
//! each loop iteration produces one and discards it after decoding.

use anyhow::{anyhow, Result};

/// One captured frame: an 8-bit grayscale pixel buffer in row-major order.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    /// Capture sequence number, assigned by the source.
    pub sequence: u64,
}

impl Frame {
    /// Create a frame from a luma buffer. Fails if the buffer length does
    /// not match `width * height`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, sequence: u64) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| anyhow!("frame dimensions overflow"))? as usize;
        if data.len() != expected {
            return Err(anyhow!(
                "luma frame length mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            sequence,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only pixel access for decoder backends.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}
