//! Polygon type and ring primitives.
//!
//! Rings are stored open (the last vertex is not repeated). In layout pixel
//! space (y down) outer rings run clockwise on screen and have positive
//! [`signed_area`]; holes run the other way and have negative area.

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// Walkable polygon: one outer ring plus zero or more holes.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    /// Outer boundary
    pub outer: Vec<PixelPoint>,
    /// Blocked islands inside the outer boundary
    pub holes: Vec<Vec<PixelPoint>>,
}

impl Polygon {
    /// Polygon without holes
    pub fn new(outer: Vec<PixelPoint>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Polygon with holes
    pub fn with_holes(outer: Vec<PixelPoint>, holes: Vec<Vec<PixelPoint>>) -> Self {
        Self { outer, holes }
    }

    /// Inside the outer ring and outside every hole
    pub fn contains(&self, point: PixelPoint) -> bool {
        ring_contains(&self.outer, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }

    /// Area of the walkable region (outer minus holes)
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.outer).abs() - holes
    }

    /// All rings, outer first
    pub fn rings(&self) -> impl Iterator<Item = &Vec<PixelPoint>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// Shoelace signed area (positive for clockwise-on-screen rings)
pub fn signed_area(ring: &[PixelPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Even-odd ray casting point-in-ring test.
///
/// Casts a ray towards +x and counts edge crossings. Points exactly on
/// an edge may land on either side.
pub fn ring_contains(ring: &[PixelPoint], point: PixelPoint) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Closest point to `p` on segment `a`-`b`
pub fn closest_point_on_segment(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> PixelPoint {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    a + ab.scale(t)
}
