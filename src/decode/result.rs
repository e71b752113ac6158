//! Decoder output types.

/// Symbologies a backend may report.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    QrCode,
}

/// Pixel-space bounding box of a detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl BoundingBox {
    /// Horizontal center of the box.
    pub fn center_x(&self) -> f64 {
        crate::lane::bbox_center_x(self.x, self.w)
    }

    /// Axis-aligned box enclosing a set of corner points.
    pub fn enclosing(points: &[(i32, i32)]) -> Self {
        let Some(&(x0, y0)) = points.first() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for &(x, y) in &points[1..] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self {
            x: min_x,
            y: min_y,
            w: (max_x - min_x) as u32,
            h: (max_y - min_y) as u32,
        }
    }
}

/// One decoded detection: payload text, symbology, position.
///
/// Lifetime is one loop iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub text: String,
    pub kind: SymbolKind,
    pub bbox: BoundingBox,
}

impl Symbol {
    pub fn qr(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            kind: SymbolKind::QrCode,
            bbox,
        }
    }
}
