//! Horizontal lane classification.
//!
//! A detected symbol is assigned a coarse position label from the thirds of
//! the frame width. The boundaries are recomputed from every frame's width,
//! so variable-resolution sources classify correctly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse horizontal zone of a symbol within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Lane::Left => "LEFT",
            Lane::Center => "CENTER",
            Lane::Right => "RIGHT",
        };
        f.write_str(tag)
    }
}

/// Classify a symbol's horizontal center against the lane boundaries.
///
/// The boundaries are `width/2 - width/3` and `width/2 + width/3`. The
/// comparisons are strict, so a center sitting exactly on a boundary
/// classifies as `Center`.
pub fn classify(center_x: f64, frame_width: u32) -> Lane {
    let width = frame_width as f64;
    let center = width / 2.0;
    let lane_width = width / 3.0;
    let lower = center - lane_width;
    let upper = center + lane_width;

    if center_x < lower {
        Lane::Left
    } else if center_x > upper {
        Lane::Right
    } else {
        Lane::Center
    }
}

/// Horizontal center of a bounding box.
pub fn bbox_center_x(x: i32, w: u32) -> f64 {
    x as f64 + w as f64 / 2.0
}
