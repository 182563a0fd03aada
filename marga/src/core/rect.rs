//! Axis-aligned rectangles in pixel space.

use serde::{Deserialize, Serialize};

use super::point::{GridCoord, PixelPoint};

/// Axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`.
///
/// Walls, fixed areas and pick locations all share this one type. Corner
/// order is normalized on construction so callers can pass either diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl Rect {
    /// Create a rectangle from two opposite corners
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Rectangle covering a block of grid cells
    pub fn from_cells(x: usize, y: usize, w: usize, h: usize, cell_size: u32) -> Self {
        let size = f64::from(cell_size);
        Self::new(
            x as f64 * size,
            y as f64 * size,
            (x + w) as f64 * size,
            (y + h) as f64 * size,
        )
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Area in square pixels
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Does this rectangle contain the point (edges inclusive)?
    #[inline]
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Do the interiors of the two rectangles overlap?
    ///
    /// Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Footprint of a grid cell
    #[inline]
    pub fn cell(coord: GridCoord, cell_size: u32) -> Self {
        let size = f64::from(cell_size);
        let x = f64::from(coord.x) * size;
        let y = f64::from(coord.y) * size;
        Self {
            x1: x,
            y1: y,
            x2: x + size,
            y2: y + size,
        }
    }

    /// Inclusive range of grid cells whose footprint overlaps this rectangle.
    ///
    /// Returns `None` for degenerate (zero-area) rectangles.
    pub fn cell_span(&self, cell_size: u32) -> Option<(GridCoord, GridCoord)> {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return None;
        }
        let size = f64::from(cell_size.max(1));
        let min = GridCoord::new(
            (self.x1 / size).floor() as i32,
            (self.y1 / size).floor() as i32,
        );
        // Exclusive upper edge: a rect ending exactly on a cell boundary
        // does not reach into the next cell.
        let max = GridCoord::new(
            ((self.x2 / size).ceil() as i32 - 1).max(min.x),
            ((self.y2 / size).ceil() as i32 - 1).max(min.y),
        );
        Some((min, max))
    }

    /// Stable sort key used for canonical serialization
    pub(crate) fn sort_key(&self) -> [i64; 4] {
        // Millipixel resolution keeps the key exact for any sane layout.
        [self.x1, self.y1, self.x2, self.y2].map(|v| (v * 1000.0).round() as i64)
    }
}
