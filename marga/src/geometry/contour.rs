//! Bitmap to polygon conversion by boundary following.
//!
//! The tracer walks the cell edges (the "cracks") that separate walkable
//! cells from blocked ones, keeping the walkable side on its right. Ring
//! vertices therefore sit on cell corners and scale to exact pixel
//! coordinates. At every corner the walker tries the four directions in a
//! fixed priority relative to its heading (right turn, straight, left turn,
//! back) and takes the first boundary edge it has not walked yet. Turning
//! right first keeps diagonally touching cells in separate rings, matching
//! the 4-connected movement of the pathfinder.

use log::{debug, trace};

use crate::core::{BoolGrid, GridCoord, PixelPoint};

use super::polygon::{Polygon, ring_contains, signed_area};
use super::simplify::simplify_ring;
use super::walkable::WalkableConfig;

/// Headings in screen space: right, down, left, up.
const DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Convert a walkable bitmap (`true` = walkable) into polygons in pixel
/// coordinates.
///
/// Traced rings shorter than `min_contour_points` are discarded, the rest
/// are simplified with Douglas-Peucker at `simplify_epsilon` grid units and
/// scaled by `cell_size`. Rings with negative signed area bound blocked
/// islands and become holes of the smallest outer ring that contains them.
pub fn bitmap_to_polygons(grid: &BoolGrid, cell_size: u32, config: &WalkableConfig) -> Vec<Polygon> {
    let rings = trace_rings(grid);
    let scale = f64::from(cell_size);

    let mut outers: Vec<(Vec<PixelPoint>, f64)> = Vec::new();
    let mut holes: Vec<Vec<PixelPoint>> = Vec::new();

    for ring in rings {
        if ring.len() < config.min_contour_points {
            trace!("[Walkable] dropping short contour ({} points)", ring.len());
            continue;
        }
        let points: Vec<PixelPoint> = ring
            .iter()
            .map(|&(x, y)| PixelPoint::new(f64::from(x), f64::from(y)))
            .collect();
        let simplified = simplify_ring(&points, config.simplify_epsilon);
        if simplified.len() < 3 {
            continue;
        }
        let scaled: Vec<PixelPoint> = simplified.iter().map(|p| p.scale(scale)).collect();
        let area = signed_area(&scaled);
        if area > 0.0 {
            outers.push((scaled, area));
        } else if area < 0.0 {
            holes.push(scaled);
        }
    }

    let mut polygons: Vec<Polygon> = outers
        .iter()
        .map(|(outer, _)| Polygon::new(outer.clone()))
        .collect();

    for hole in holes {
        let owner = outers
            .iter()
            .enumerate()
            .filter(|(_, (outer, _))| ring_contains(outer, hole[0]))
            .min_by(|a, b| a.1.1.total_cmp(&b.1.1))
            .map(|(i, _)| i);
        match owner {
            Some(i) => polygons[i].holes.push(hole),
            None => debug!("[Walkable] hole at ({:.1},{:.1}) has no enclosing ring", hole[0].x, hole[0].y),
        }
    }

    debug!(
        "[Walkable] traced {} polygons ({} holes) from {}x{} grid",
        polygons.len(),
        polygons.iter().map(|p| p.holes.len()).sum::<usize>(),
        grid.width(),
        grid.height()
    );
    polygons
}

/// Trace every boundary ring of the walkable region, in grid-corner units.
///
/// Only direction changes are recorded, so each ring is its list of corners.
pub fn trace_rings(grid: &BoolGrid) -> Vec<Vec<(i32, i32)>> {
    let mut field = EdgeField::new(grid);
    let mut rings = Vec::new();

    // Every closed rectilinear ring has at least one downward edge (a cell
    // with a blocked right neighbor), so this scan reaches every ring.
    for cy in 0..grid.height() as i32 {
        for cx in 0..grid.width() as i32 {
            if !field.walkable(cx, cy) {
                continue;
            }
            let starts = [((cx + 1, cy), 1usize), ((cx + 1, cy + 1), 2usize)];
            for (vertex, dir) in starts {
                if field.has_edge(vertex, dir) && !field.is_used(vertex, dir) {
                    if let Some(ring) = field.trace(vertex, dir) {
                        rings.push(ring);
                    }
                }
            }
        }
    }
    rings
}

struct EdgeField<'a> {
    grid: &'a BoolGrid,
    stride: usize,
    used: Vec<bool>,
    edge_count: usize,
}

impl<'a> EdgeField<'a> {
    fn new(grid: &'a BoolGrid) -> Self {
        let stride = grid.width() + 1;
        let vertices = stride * (grid.height() + 1);
        let mut field = Self {
            grid,
            stride,
            used: vec![false; vertices * 4],
            edge_count: 0,
        };
        let mut count = 0;
        for vy in 0..=grid.height() as i32 {
            for vx in 0..=grid.width() as i32 {
                count += (0..4).filter(|&d| field.has_edge((vx, vy), d)).count();
            }
        }
        field.edge_count = count;
        field
    }

    #[inline]
    fn walkable(&self, x: i32, y: i32) -> bool {
        self.grid.get(GridCoord::new(x, y))
    }

    /// Is there a boundary edge leaving `vertex` in `dir` with walkable on its right?
    fn has_edge(&self, (vx, vy): (i32, i32), dir: usize) -> bool {
        match dir {
            0 => self.walkable(vx, vy) && !self.walkable(vx, vy - 1),
            1 => self.walkable(vx - 1, vy) && !self.walkable(vx, vy),
            2 => self.walkable(vx - 1, vy - 1) && !self.walkable(vx - 1, vy),
            _ => self.walkable(vx, vy - 1) && !self.walkable(vx - 1, vy - 1),
        }
    }

    #[inline]
    fn index(&self, (vx, vy): (i32, i32), dir: usize) -> usize {
        (vy as usize * self.stride + vx as usize) * 4 + dir
    }

    fn is_used(&self, vertex: (i32, i32), dir: usize) -> bool {
        self.used[self.index(vertex, dir)]
    }

    fn mark_used(&mut self, vertex: (i32, i32), dir: usize) {
        let idx = self.index(vertex, dir);
        self.used[idx] = true;
    }

    fn trace(&mut self, start: (i32, i32), start_dir: usize) -> Option<Vec<(i32, i32)>> {
        let mut corners = Vec::new();
        let mut vertex = start;
        let mut dir = start_dir;
        let mut prev_dir: Option<usize> = None;
        let mut steps = 0usize;

        loop {
            self.mark_used(vertex, dir);
            if prev_dir != Some(dir) {
                corners.push(vertex);
            }
            vertex = (vertex.0 + DIRS[dir].0, vertex.1 + DIRS[dir].1);
            steps += 1;

            if vertex == start {
                // Start vertex is collinear when we arrive heading the same way.
                if dir == start_dir && corners.len() > 1 {
                    corners.remove(0);
                }
                return Some(corners);
            }
            if steps > self.edge_count {
                debug!("[Walkable] contour trace exceeded {} steps, dropping", self.edge_count);
                return None;
            }

            let candidates = [(dir + 1) % 4, dir, (dir + 3) % 4, (dir + 2) % 4];
            let next = candidates
                .into_iter()
                .find(|&d| self.has_edge(vertex, d) && !self.is_used(vertex, d));
            match next {
                Some(d) => {
                    prev_dir = Some(dir);
                    dir = d;
                }
                None => {
                    debug!("[Walkable] open contour at ({},{}), dropping", vertex.0, vertex.1);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Tolerance below one cell keeps every traced corner.
    fn exact() -> WalkableConfig {
        WalkableConfig {
            simplify_epsilon: 0.5,
            ..WalkableConfig::default()
        }
    }

    #[test]
    fn test_single_block_traces_rectangle() {
        let grid = BoolGrid::from_ascii(
            "
            #####
            #...#
            #...#
            #####
            ",
        );
        let rings = trace_rings(&grid);
        assert_eq!(rings, vec![vec![(4, 1), (4, 3), (1, 3), (1, 1)]]);

        let polys = bitmap_to_polygons(&grid, 25, &exact());
        assert_eq!(polys.len(), 1);
        assert_relative_eq!(polys[0].area(), 75.0 * 50.0);
        assert!(polys[0].contains(PixelPoint::new(30.0, 30.0)));
        assert!(!polys[0].contains(PixelPoint::new(10.0, 10.0)));
    }

    #[test]
    fn test_full_grid_is_one_ring() {
        let grid = BoolGrid::new(4, 3, true);
        let rings = trace_rings(&grid);
        assert_eq!(rings, vec![vec![(4, 0), (4, 3), (0, 3), (0, 0)]]);
    }

    #[test]
    fn test_disjoint_regions_give_separate_polygons() {
        let grid = BoolGrid::from_ascii(
            "
            ..#..
            ..#..
            ..#..
            ",
        );
        let polys = bitmap_to_polygons(&grid, 10, &exact());
        assert_eq!(polys.len(), 2);
        assert!(polys.iter().all(|p| p.holes.is_empty()));
    }

    #[test]
    fn test_interior_obstacle_becomes_hole() {
        let grid = BoolGrid::from_ascii(
            "
            ........
            ........
            ..####..
            ..####..
            ........
            ........
            ",
        );
        let polys = bitmap_to_polygons(&grid, 10, &exact());
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].holes.len(), 1);
        assert!(!polys[0].contains(PixelPoint::new(35.0, 25.0)));
        assert!(polys[0].contains(PixelPoint::new(5.0, 5.0)));
        assert_relative_eq!(polys[0].area(), 80.0 * 60.0 - 40.0 * 20.0);
    }

    #[test]
    fn test_diagonal_cells_stay_separate() {
        let grid = BoolGrid::from_ascii(
            "
            .#
            #.
            ",
        );
        let rings = trace_rings(&grid);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn test_default_tolerance_smooths_small_jogs() {
        // A one-cell notch in a long wall sits within the 2-cell tolerance.
        let mut rows = vec![vec![true; 20]; 10];
        rows[0][10] = false;
        let grid = BoolGrid::from_rows(&rows);
        assert_eq!(trace_rings(&grid)[0].len(), 8);

        let polys = bitmap_to_polygons(&grid, 10, &WalkableConfig::default());
        assert_eq!(polys.len(), 1);
        assert!(polys[0].outer.len() < 8);
    }

    #[test]
    fn test_short_contours_are_dropped() {
        let grid = BoolGrid::from_ascii("...");
        let strict = WalkableConfig {
            min_contour_points: 5,
            ..exact()
        };
        assert!(bitmap_to_polygons(&grid, 10, &strict).is_empty());
        assert_eq!(bitmap_to_polygons(&grid, 10, &exact()).len(), 1);
    }

    #[test]
    fn test_empty_grid() {
        let grid = BoolGrid::new(3, 3, false);
        assert!(bitmap_to_polygons(&grid, 10, &exact()).is_empty());
    }
}
