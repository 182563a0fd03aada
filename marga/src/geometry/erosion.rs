//! Inward polygon offset for cart clearance.
//!
//! Each vertex moves along the bisector of its two adjacent edge normals.
//! Normals are the clockwise (screen space) rotation of the edge direction,
//! which points into the walkable side for both outer rings and holes, so
//! one formula shrinks outer rings and grows holes.

use log::trace;

use crate::core::PixelPoint;

use super::polygon::{Polygon, ring_contains, signed_area};

/// Erode every polygon by `distance` pixels.
///
/// Edges shorter than `min_edge_length` after the move are collapsed to
/// remove slivers. Outer rings that collapse or flip orientation remove
/// their whole polygon.
///
/// Holes are not discarded after erosion: they grow by `distance`, keeping
/// the same clearance around interior fixed areas as along the outer ring.
/// Only holes that collapse are dropped.
pub fn erode(polygons: &[Polygon], distance: f64, min_edge_length: f64) -> Vec<Polygon> {
    if distance <= 0.0 {
        return polygons.to_vec();
    }

    polygons
        .iter()
        .filter_map(|poly| {
            let outer = erode_ring(&poly.outer, distance, min_edge_length)?;
            // Over-eroded rings fold through themselves and poke outside.
            if signed_area(&outer) <= 0.0 || !outer.iter().all(|p| ring_contains(&poly.outer, *p)) {
                trace!("[Walkable] outer ring collapsed under erosion, dropping polygon");
                return None;
            }
            let holes = poly
                .holes
                .iter()
                .filter_map(|h| erode_ring(h, distance, min_edge_length))
                .filter(|h| signed_area(h) < 0.0)
                .collect();
            Some(Polygon::with_holes(outer, holes))
        })
        .collect()
}

/// Offset one ring; `None` if fewer than three vertices survive.
pub fn erode_ring(ring: &[PixelPoint], distance: f64, min_edge_length: f64) -> Option<Vec<PixelPoint>> {
    let n = ring.len();
    if n < 3 {
        return None;
    }

    let moved: Vec<PixelPoint> = (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let curr = ring[i];
            let next = ring[(i + 1) % n];
            let n_in = edge_normal(prev, curr);
            let n_out = edge_normal(curr, next);
            let sum = n_in + n_out;
            let len = sum.length();
            // Opposing normals (a spike) have no bisector; use the incoming one.
            let bisector = if len < 1e-9 { n_in } else { sum.scale(1.0 / len) };
            curr + bisector.scale(distance)
        })
        .collect();

    let mut kept: Vec<PixelPoint> = Vec::with_capacity(n);
    for p in moved {
        match kept.last() {
            Some(last) if last.distance(&p) < min_edge_length => {}
            _ => kept.push(p),
        }
    }
    while kept.len() > 1 && kept[0].distance(&kept[kept.len() - 1]) < min_edge_length {
        kept.pop();
    }

    (kept.len() >= 3).then_some(kept)
}

/// Unit normal of edge `a`-`b`: its direction rotated 90° clockwise on screen.
fn edge_normal(a: PixelPoint, b: PixelPoint) -> PixelPoint {
    let d = b - a;
    let len = d.length();
    if len < 1e-12 {
        return PixelPoint::ZERO;
    }
    PixelPoint::new(-d.y / len, d.x / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Clockwise-on-screen square, the orientation the tracer produces.
    fn square(x: f64, y: f64, size: f64) -> Vec<PixelPoint> {
        vec![
            PixelPoint::new(x, y),
            PixelPoint::new(x + size, y),
            PixelPoint::new(x + size, y + size),
            PixelPoint::new(x, y + size),
        ]
    }

    #[test]
    fn test_square_shrinks_along_bisectors() {
        let ring = erode_ring(&square(0.0, 0.0, 100.0), 10.0, 1.0).unwrap();
        let step = 10.0 / 2f64.sqrt();
        assert_relative_eq!(ring[0].x, step, epsilon = 1e-9);
        assert_relative_eq!(ring[0].y, step, epsilon = 1e-9);
        assert_relative_eq!(ring[2].x, 100.0 - step, epsilon = 1e-9);
        assert_relative_eq!(ring[2].y, 100.0 - step, epsilon = 1e-9);
    }

    #[test]
    fn test_hole_grows() {
        let hole: Vec<PixelPoint> = square(40.0, 40.0, 20.0).into_iter().rev().collect();
        let poly = Polygon::with_holes(square(0.0, 0.0, 100.0), vec![hole]);
        let eroded = erode(&[poly.clone()], 5.0, 1.0);
        assert_eq!(eroded.len(), 1);
        assert_eq!(eroded[0].holes.len(), 1);
        assert!(signed_area(&eroded[0].holes[0]).abs() > 400.0);
        assert!(eroded[0].area() < poly.area());
        // Just outside the original hole is now blocked.
        assert!(poly.contains(PixelPoint::new(38.0, 50.0)));
        assert!(!eroded[0].contains(PixelPoint::new(38.0, 50.0)));
    }

    #[test]
    fn test_over_erosion_drops_polygon() {
        let poly = Polygon::new(square(0.0, 0.0, 10.0));
        assert!(erode(&[poly], 20.0, 1.0).is_empty());
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let poly = Polygon::new(square(0.0, 0.0, 10.0));
        assert_eq!(erode(&[poly.clone()], 0.0, 1.0), vec![poly]);
    }

    #[test]
    fn test_short_edges_collapse() {
        // Tiny 0.5px jog next to a corner disappears after erosion.
        let ring = vec![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(50.0, 0.0),
            PixelPoint::new(50.0, 0.5),
            PixelPoint::new(100.0, 0.5),
            PixelPoint::new(100.0, 100.0),
            PixelPoint::new(0.0, 100.0),
        ];
        let eroded = erode_ring(&ring, 2.0, 1.0).unwrap();
        assert!(eroded.len() < ring.len());
    }
}
