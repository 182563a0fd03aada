//! Walkable floor area as polygons, with containment and boundary queries.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{BoolGrid, PixelPoint, Rect};

use super::contour::bitmap_to_polygons;
use super::erosion::erode;
use super::polygon::{Polygon, closest_point_on_segment};
use super::rect_pack::rectangles_to_grid;

/// Walkable geometry configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkableConfig {
    /// Douglas-Peucker tolerance in grid units
    pub simplify_epsilon: f64,
    /// Traced rings with fewer corners are discarded
    pub min_contour_points: usize,
    /// Edges shorter than this (pixels) are collapsed after erosion
    pub min_edge_length: f64,
    /// Offset (pixels) used by [`WalkableArea::nudge_inside`]
    pub nudge_epsilon: f64,
}

impl Default for WalkableConfig {
    fn default() -> Self {
        Self {
            simplify_epsilon: 2.0,
            min_contour_points: 4,
            min_edge_length: 1.0,
            nudge_epsilon: 1.0,
        }
    }
}

/// The walkable part of a floor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkableArea {
    polygons: Vec<Polygon>,
}

impl WalkableArea {
    /// Wrap existing polygons
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Trace a walkable bitmap (`true` = walkable)
    pub fn from_grid(grid: &BoolGrid, cell_size: u32, config: &WalkableConfig) -> Self {
        Self::new(bitmap_to_polygons(grid, cell_size, config))
    }

    /// Rasterize obstacles over a `width` x `height` pixel floor, trace the
    /// free space and erode it by `clearance` pixels.
    pub fn from_obstacles(
        width: f64,
        height: f64,
        obstacles: &[Rect],
        cell_size: u32,
        clearance: f64,
        config: &WalkableConfig,
    ) -> Self {
        let size = f64::from(cell_size.max(1));
        let cols = (width / size).ceil().max(0.0) as usize;
        let rows = (height / size).ceil().max(0.0) as usize;
        let walkable = rectangles_to_grid(obstacles, cols, rows, cell_size).inverted();
        let area = Self::from_grid(&walkable, cell_size, config);
        debug!(
            "[Walkable] {} obstacles on {}x{} cells -> {} polygons, clearance {:.1}px",
            obstacles.len(),
            cols,
            rows,
            area.polygons.len(),
            clearance
        );
        area.eroded(clearance, config.min_edge_length)
    }

    /// Shrink the walkable area by `distance` pixels
    pub fn eroded(&self, distance: f64, min_edge_length: f64) -> Self {
        Self::new(erode(&self.polygons, distance, min_edge_length))
    }

    /// Polygons making up the area
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// No walkable polygons at all
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Is the point inside any polygon (and outside its holes)?
    pub fn contains(&self, point: PixelPoint) -> bool {
        self.polygons.iter().any(|p| p.contains(point))
    }

    /// Closest point on any ring of any polygon
    pub fn nearest_point_on_boundary(&self, point: PixelPoint) -> Option<PixelPoint> {
        let mut best: Option<(PixelPoint, f64)> = None;
        for ring in self.polygons.iter().flat_map(Polygon::rings) {
            let n = ring.len();
            for i in 0..n {
                let candidate = closest_point_on_segment(point, ring[i], ring[(i + 1) % n]);
                let d = candidate.distance_squared(&point);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((candidate, d));
                }
            }
        }
        best.map(|(p, _)| p)
    }

    /// First of the eight compass offsets of length `epsilon` that lands
    /// inside the area. Best effort: returns `point` unchanged when none does.
    pub fn nudge_inside(&self, point: PixelPoint, epsilon: f64) -> PixelPoint {
        if self.contains(point) {
            return point;
        }
        let d = epsilon / std::f64::consts::SQRT_2;
        let offsets = [
            (0.0, -epsilon),
            (d, -d),
            (epsilon, 0.0),
            (d, d),
            (0.0, epsilon),
            (-d, d),
            (-epsilon, 0.0),
            (-d, -d),
        ];
        offsets
            .iter()
            .map(|&(dx, dy)| PixelPoint::new(point.x + dx, point.y + dy))
            .find(|&p| self.contains(p))
            .unwrap_or(point)
    }

    /// Move an outside point onto the area: snap to the nearest boundary
    /// point, then nudge inside. Points already inside are returned as-is.
    pub fn snap_inside(&self, point: PixelPoint, epsilon: f64) -> PixelPoint {
        if self.contains(point) {
            return point;
        }
        match self.nearest_point_on_boundary(point) {
            Some(edge) => self.nudge_inside(edge, epsilon),
            None => point,
        }
    }
}
