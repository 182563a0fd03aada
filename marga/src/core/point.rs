//! Point and coordinate types for the warehouse floor.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a pixel point (floor division by cell size)
    #[inline]
    pub fn from_pixel(point: PixelPoint, cell_size: u32) -> Self {
        let size = f64::from(cell_size.max(1));
        Self::new((point.x / size).floor() as i32, (point.y / size).floor() as i32)
    }

    /// Pixel center of this cell
    #[inline]
    pub fn center(&self, cell_size: u32) -> PixelPoint {
        let size = f64::from(cell_size);
        PixelPoint::new(
            f64::from(self.x) * size + size / 2.0,
            f64::from(self.y) * size + size / 2.0,
        )
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Get the 4 cardinal neighbors (right, down, left, up)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x + 1, self.y),
            GridCoord::new(self.x, self.y + 1),
            GridCoord::new(self.x - 1, self.y),
            GridCoord::new(self.x, self.y - 1),
        ]
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Point in layout pixel space (x right, y down)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    /// X coordinate in pixels
    pub x: f64,
    /// Y coordinate in pixels
    pub y: f64,
}

impl PixelPoint {
    /// Create a new pixel point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin of the layout
    pub const ZERO: PixelPoint = PixelPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &PixelPoint) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length of this point treated as a vector
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scale by a factor
    #[inline]
    pub fn scale(&self, factor: f64) -> PixelPoint {
        PixelPoint::new(self.x * factor, self.y * factor)
    }
}

impl Add for PixelPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PixelPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for PixelPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(f64, f64)> for PixelPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
