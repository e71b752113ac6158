use anyhow::{anyhow, Result};
use image::GrayImage;

use crate::decode::backend::DecoderBackend;
use crate::decode::result::{BoundingBox, Symbol, SymbolKind};
use crate::frame::Frame;

/// QR decoder backend built on `rqrr`.
///
/// Runs grid detection on the luma plane and decodes every located grid.
/// A grid that fails to decode (damaged code, partial view) is skipped; the
/// remaining grids in the frame are still reported.
#[derive(Default)]
pub struct RqrrBackend;

impl RqrrBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DecoderBackend for RqrrBackend {
    fn name(&self) -> &'static str {
        "rqrr"
    }

    fn supports(&self, kind: SymbolKind) -> bool {
        matches!(kind, SymbolKind::QrCode)
    }

    fn decode(&mut self, frame: &Frame) -> Result<Vec<Symbol>> {
        let image = GrayImage::from_raw(frame.width(), frame.height(), frame.pixels().to_vec())
            .ok_or_else(|| anyhow!("frame buffer does not match dimensions"))?;

        let mut prepared = rqrr::PreparedImage::prepare(image);
        let grids = prepared.detect_grids();

        let mut symbols = Vec::with_capacity(grids.len());
        for grid in &grids {
            let bbox = bounds_to_bbox(&grid.bounds);
            match grid.decode() {
                Ok((_meta, content)) => symbols.push(Symbol::qr(content, bbox)),
                Err(err) => {
                    log::debug!("rqrr: skipping undecodable grid at {:?}: {}", bbox, err);
                }
            }
        }
        Ok(symbols)
    }
}

fn bounds_to_bbox(bounds: &[rqrr::Point; 4]) -> BoundingBox {
    let corners: Vec<(i32, i32)> = bounds.iter().map(|p| (p.x, p.y)).collect();
    BoundingBox::enclosing(&corners)
}
