//! 4-connected A* over a bounded warehouse grid.

use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use log::{debug, trace};

use crate::core::{BoolGrid, GridCoord, PixelPoint};

use crate::pathfinding::{BlockingStrategy, PathSearch};

use super::types::{AStarNode, PathFailure, PathResult, PathfinderConfig};

/// Shortest-path search between pixel points on one floor.
///
/// Blocked cells are rasterized once at construction, so repeated queries
/// against the same floor only pay for the search itself. Cells outside
/// the floor are always blocked.
#[derive(Clone, Debug)]
pub struct GridPathfinder {
    config: PathfinderConfig,
    /// `true` = blocked
    blocked: BoolGrid,
}

impl GridPathfinder {
    /// Build a pathfinder for a `width` x `height` pixel floor
    pub fn new(width: f64, height: f64, blocking: &BlockingStrategy, config: PathfinderConfig) -> Self {
        let config = PathfinderConfig {
            cell_size: config.cell_size.max(1),
            ..config
        };
        let size = f64::from(config.cell_size);
        let cols = (width / size).ceil().max(0.0) as usize;
        let rows = (height / size).ceil().max(0.0) as usize;
        let blocked = blocking.blocked_mask(cols, rows, config.cell_size);
        debug!(
            "[Pathfinder] {}x{} cells at {}px, {} blocked ({} strategy)",
            cols,
            rows,
            config.cell_size,
            blocked.count(),
            blocking.name()
        );
        Self { config, blocked }
    }

    /// Configuration in use
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Grid width in cells
    pub fn cols(&self) -> usize {
        self.blocked.width()
    }

    /// Grid height in cells
    pub fn rows(&self) -> usize {
        self.blocked.height()
    }

    /// Is this cell off the floor or obstructed?
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        !self.blocked.in_bounds(coord) || self.blocked.get(coord)
    }

    /// Nearest walkable cell by 4-connected BFS, at most `fallback_radius`
    /// moves away. Returns `coord` itself when it is walkable.
    pub fn nearest_walkable(&self, coord: GridCoord) -> Option<GridCoord> {
        if !self.is_blocked(coord) {
            return Some(coord);
        }

        let radius = self.config.fallback_radius;
        let mut queue = VecDeque::from([(coord, 0u32)]);
        let mut seen = HashSet::from([coord]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= radius {
                continue;
            }
            for neighbor in current.neighbors_4() {
                if !seen.insert(neighbor) {
                    continue;
                }
                if !self.is_blocked(neighbor) {
                    trace!(
                        "[Pathfinder] snapped ({},{}) to ({},{}) at depth {}",
                        coord.x,
                        coord.y,
                        neighbor.x,
                        neighbor.y,
                        depth + 1
                    );
                    return Some(neighbor);
                }
                queue.push_back((neighbor, depth + 1));
            }
        }
        None
    }

    /// Shortest 4-connected path between two pixel points.
    ///
    /// Blocked endpoints are replaced by the nearest walkable cell within
    /// the fallback radius. Never fails: an unreachable pair yields the
    /// sentinel distance and an empty path.
    pub fn shortest(&self, start: PixelPoint, goal: PixelPoint) -> PathResult {
        let cell_size = self.config.cell_size;
        let start_cell = GridCoord::from_pixel(start, cell_size);
        let goal_cell = GridCoord::from_pixel(goal, cell_size);
        trace!(
            "[Pathfinder] shortest: start=({},{}) goal=({},{})",
            start_cell.x, start_cell.y, goal_cell.x, goal_cell.y
        );

        let Some(start_cell) = self.nearest_walkable(start_cell) else {
            debug!("[Pathfinder] FAILED: no walkable cell near start ({:.0},{:.0})", start.x, start.y);
            return PathResult::unreachable(PathFailure::StartUnresolved);
        };
        let Some(goal_cell) = self.nearest_walkable(goal_cell) else {
            debug!("[Pathfinder] FAILED: no walkable cell near goal ({:.0},{:.0})", goal.x, goal.y);
            return PathResult::unreachable(PathFailure::GoalUnresolved);
        };

        self.search(start_cell, goal_cell)
    }

    /// A* between two walkable cells
    fn search(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        let step = u64::from(self.config.cell_size);

        let mut open_set = BinaryHeap::new();
        let mut closed_set = HashSet::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut g_scores: HashMap<GridCoord, u64> = HashMap::new();
        let mut seq = 0u64;

        open_set.push(AStarNode {
            coord: start,
            g_cost: 0,
            f_cost: self.heuristic(start, goal),
            seq,
        });
        g_scores.insert(start, 0);

        let mut nodes_expanded = 0usize;

        while let Some(current) = open_set.pop() {
            if current.coord == goal {
                return self.reconstruct_path(&came_from, goal, current.g_cost, nodes_expanded);
            }
            if !closed_set.insert(current.coord) {
                continue;
            }
            nodes_expanded += 1;

            for neighbor in current.coord.neighbors_4() {
                if closed_set.contains(&neighbor) || self.is_blocked(neighbor) {
                    continue;
                }

                let tentative_g = current.g_cost + step;
                let known_g = g_scores.get(&neighbor).copied().unwrap_or(u64::MAX);
                if tentative_g < known_g {
                    came_from.insert(neighbor, current.coord);
                    g_scores.insert(neighbor, tentative_g);
                    seq += 1;
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + self.heuristic(neighbor, goal),
                        seq,
                    });
                }
            }
        }

        debug!(
            "[Pathfinder] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        PathResult::unreachable(PathFailure::NoPath)
    }

    /// Manhattan distance in pixels (admissible and consistent on a
    /// 4-connected uniform-cost grid)
    #[inline]
    fn heuristic(&self, from: GridCoord, to: GridCoord) -> u64 {
        u64::from(from.manhattan_distance(&to)) * u64::from(self.config.cell_size)
    }

    fn reconstruct_path(
        &self,
        came_from: &HashMap<GridCoord, GridCoord>,
        goal: GridCoord,
        cost: u64,
        nodes_expanded: usize,
    ) -> PathResult {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(&prev) = came_from.get(&current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();

        trace!(
            "[Pathfinder] SUCCESS: path length={} cells, cost={}, nodes_expanded={}",
            cells.len(),
            cost,
            nodes_expanded
        );

        let path = cells
            .iter()
            .map(|c| c.center(self.config.cell_size))
            .collect();
        PathResult::found(cost, path)
    }
}

impl PathSearch for GridPathfinder {
    fn shortest(&self, start: PixelPoint, goal: PixelPoint) -> PathResult {
        GridPathfinder::shortest(self, start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::pathfinding::UNREACHABLE_DISTANCE;

    fn open_floor(size: f64) -> GridPathfinder {
        GridPathfinder::new(
            size,
            size,
            &BlockingStrategy::Rectangles(Vec::new()),
            PathfinderConfig::with_cell_size(10),
        )
    }

    #[test]
    fn test_straight_path() {
        let finder = open_floor(100.0);
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(95.0, 5.0));
        assert!(result.is_reachable());
        assert_eq!(result.distance, 90);
        assert_eq!(result.path.len(), 10);
        assert_eq!(result.path[0], PixelPoint::new(5.0, 5.0));
        assert_eq!(result.path[9], PixelPoint::new(95.0, 5.0));
    }

    #[test]
    fn test_same_cell_is_zero() {
        let finder = open_floor(100.0);
        let result = finder.shortest(PixelPoint::new(1.0, 1.0), PixelPoint::new(8.0, 9.0));
        assert_eq!(result.distance, 0);
        assert_eq!(result.path, vec![PixelPoint::new(5.0, 5.0)]);
    }

    #[test]
    fn test_path_around_wall() {
        let wall = Rect::new(40.0, 0.0, 50.0, 80.0);
        let finder = GridPathfinder::new(
            100.0,
            100.0,
            &BlockingStrategy::Rectangles(vec![wall]),
            PathfinderConfig::with_cell_size(10),
        );
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(95.0, 5.0));
        // Down 8 rows, across 9 columns, back up 8 rows.
        assert_eq!(result.distance, (8 + 9 + 8) * 10);
        assert!(result.path.iter().all(|p| !wall.contains(*p)));
    }

    #[test]
    fn test_fully_split_floor_is_unreachable() {
        let wall = Rect::new(40.0, 0.0, 50.0, 100.0);
        let finder = GridPathfinder::new(
            100.0,
            100.0,
            &BlockingStrategy::Rectangles(vec![wall]),
            PathfinderConfig::with_cell_size(10),
        );
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(95.0, 5.0));
        assert_eq!(result.distance, UNREACHABLE_DISTANCE);
        assert!(result.path.is_empty());
        assert_eq!(result.failure, Some(PathFailure::NoPath));
    }

    #[test]
    fn test_blocked_start_snaps_to_nearest_cell() {
        let pillar = Rect::new(0.0, 0.0, 30.0, 10.0);
        let finder = GridPathfinder::new(
            100.0,
            100.0,
            &BlockingStrategy::Rectangles(vec![pillar]),
            PathfinderConfig::with_cell_size(10),
        );
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(5.0, 95.0));
        assert!(result.is_reachable());
        assert_eq!(result.path[0], PixelPoint::new(5.0, 15.0));
        assert_eq!(result.distance, 80);
    }

    #[test]
    fn test_fallback_radius_exhausted() {
        let block = Rect::new(0.0, 0.0, 100.0, 100.0);
        let finder = GridPathfinder::new(
            200.0,
            200.0,
            &BlockingStrategy::Rectangles(vec![block]),
            PathfinderConfig {
                cell_size: 10,
                fallback_radius: 3,
            },
        );
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(150.0, 150.0));
        assert_eq!(result.failure, Some(PathFailure::StartUnresolved));
        assert_eq!(result.distance, UNREACHABLE_DISTANCE);

        let wider = GridPathfinder::new(
            200.0,
            200.0,
            &BlockingStrategy::Rectangles(vec![block]),
            PathfinderConfig::with_cell_size(10),
        );
        assert!(wider.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(150.0, 150.0)).is_reachable());
    }

    #[test]
    fn test_off_floor_goal_snaps_inside() {
        let finder = open_floor(100.0);
        let result = finder.shortest(PixelPoint::new(5.0, 5.0), PixelPoint::new(5.0, 130.0));
        assert!(result.is_reachable());
        assert_eq!(*result.path.last().unwrap(), PixelPoint::new(5.0, 95.0));
    }
}
