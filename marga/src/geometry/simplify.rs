//! Ramer-Douglas-Peucker ring simplification.

use crate::core::PixelPoint;

/// Simplify a polyline, keeping points farther than `tolerance` from the
/// chord between their retained neighbors. Endpoints are always kept.
pub fn simplify_polyline(points: &[PixelPoint], tolerance: f64) -> Vec<PixelPoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[points.len() - 1] = true;
    rdp_recurse(points, 0, points.len() - 1, tolerance, &mut kept);

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect()
}

/// Simplify a closed ring (stored open). The first vertex is kept as anchor.
pub fn simplify_ring(ring: &[PixelPoint], tolerance: f64) -> Vec<PixelPoint> {
    if ring.len() < 4 {
        return ring.to_vec();
    }
    let mut closed = ring.to_vec();
    closed.push(ring[0]);
    let mut simplified = simplify_polyline(&closed, tolerance);
    simplified.pop();
    simplified
}

fn rdp_recurse(points: &[PixelPoint], start: usize, end: usize, tolerance: f64, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;
    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, tolerance, kept);
        rdp_recurse(points, max_idx, end, tolerance, kept);
    }
}

/// Distance from `p` to the line through `a` and `b`; falls back to the
/// point distance when `a == b` (closed rings).
fn perpendicular_distance(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return p.distance(&a);
    }
    let cross = dx * (a.y - p.y) - dy * (a.x - p.x);
    cross.abs() / length_sq.sqrt()
}
