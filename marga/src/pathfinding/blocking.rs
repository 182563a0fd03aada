//! Which grid cells a cart cannot enter.

use crate::core::{BoolGrid, GridCoord, Rect};
use crate::geometry::{WalkableArea, rectangles_to_grid};

/// How blocked cells are decided.
#[derive(Clone, Debug)]
pub enum BlockingStrategy {
    /// A cell is blocked when it overlaps any of these rectangles
    Rectangles(Vec<Rect>),
    /// A cell is blocked when it overlaps an obstacle or its center lies
    /// outside the walkable area. Simplified polygons can round over thin
    /// walls, so the obstacles always block as well.
    Polygon {
        /// Traced (and possibly eroded) free space
        walkable: WalkableArea,
        /// Walls and fixed areas the polygon was traced from
        obstacles: Vec<Rect>,
    },
}

impl BlockingStrategy {
    /// Rasterize into a `cols` x `rows` mask (`true` = blocked)
    pub fn blocked_mask(&self, cols: usize, rows: usize, cell_size: u32) -> BoolGrid {
        match self {
            Self::Rectangles(rects) => rectangles_to_grid(rects, cols, rows, cell_size),
            Self::Polygon {
                walkable,
                obstacles,
            } => {
                let mut mask = rectangles_to_grid(obstacles, cols, rows, cell_size);
                for y in 0..rows as i32 {
                    for x in 0..cols as i32 {
                        let coord = GridCoord::new(x, y);
                        if !walkable.contains(coord.center(cell_size)) {
                            mask.set(coord, true);
                        }
                    }
                }
                mask
            }
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangles(_) => "rectangles",
            Self::Polygon { .. } => "polygon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PixelPoint;
    use crate::geometry::Polygon;

    #[test]
    fn test_rectangle_mask() {
        let strategy = BlockingStrategy::Rectangles(vec![Rect::new(25.0, 0.0, 40.0, 50.0)]);
        let mask = strategy.blocked_mask(3, 3, 25);
        // to_ascii prints set cells as `.`, so `.` marks blocked here.
        assert_eq!(mask.to_ascii(), "#.#\n#.#\n###\n");
    }

    #[test]
    fn test_polygon_mask_uses_cell_centers() {
        let area = WalkableArea::new(vec![Polygon::new(vec![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(40.0, 0.0),
            PixelPoint::new(40.0, 75.0),
            PixelPoint::new(0.0, 75.0),
        ])]);
        let strategy = BlockingStrategy::Polygon {
            walkable: area,
            obstacles: Vec::new(),
        };
        let mask = strategy.blocked_mask(3, 3, 25);
        // Centers at x = 12.5 and 37.5 are inside, 62.5 is not.
        assert_eq!(mask.to_ascii(), "##.\n##.\n##.\n");
    }

    #[test]
    fn test_polygon_mask_keeps_obstacles_blocked() {
        // The whole floor counts as walkable, but a wall still blocks.
        let area = WalkableArea::new(vec![Polygon::new(vec![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(75.0, 0.0),
            PixelPoint::new(75.0, 75.0),
            PixelPoint::new(0.0, 75.0),
        ])]);
        let wall = Rect::new(25.0, 0.0, 40.0, 50.0);
        let strategy = BlockingStrategy::Polygon {
            walkable: area,
            obstacles: vec![wall],
        };
        let polygon_mask = strategy.blocked_mask(3, 3, 25);
        let rect_mask = BlockingStrategy::Rectangles(vec![wall]).blocked_mask(3, 3, 25);
        assert_eq!(polygon_mask, rect_mask);
    }
}
