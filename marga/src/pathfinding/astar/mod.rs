//! A* pathfinding on the warehouse grid.
//!
//! Implements A* search with:
//! - 4-connected movement at uniform cost (one cell = `cell_size` pixels)
//! - Manhattan heuristic in pixel units
//! - BFS snapping of blocked endpoints to the nearest walkable cell

mod planner;
mod types;

pub use planner::GridPathfinder;
pub use types::{PathFailure, PathResult, PathfinderConfig, UNREACHABLE_DISTANCE, is_unreachable};
