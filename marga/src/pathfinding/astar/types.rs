//! A* types: configuration, search nodes, results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, PixelPoint};

/// Distance reported when no path exists.
///
/// Deliberately huge but finite so route optimization still produces a
/// tour. Compare against it (or use [`is_unreachable`]) to detect
/// unreachable stops.
pub const UNREACHABLE_DISTANCE: u64 = 100_000_000;

/// Does this distance mean "no path found"?
#[inline]
pub fn is_unreachable(distance: u64) -> bool {
    distance >= UNREACHABLE_DISTANCE
}

/// Grid pathfinder configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathfinderConfig {
    /// Pixels per grid cell (also the cost of one move)
    pub cell_size: u32,
    /// Maximum BFS radius (cells) when snapping a blocked endpoint
    pub fallback_radius: u32,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            cell_size: 25,
            fallback_radius: 20,
        }
    }
}

impl PathfinderConfig {
    /// Default configuration with a custom cell size
    pub fn with_cell_size(cell_size: u32) -> Self {
        Self {
            cell_size,
            ..Default::default()
        }
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathFailure {
    /// No walkable cell within the fallback radius of the start
    StartUnresolved,
    /// No walkable cell within the fallback radius of the goal
    GoalUnresolved,
    /// Open set exhausted before reaching the goal
    NoPath,
}

/// Result of a shortest-path query
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Path length in pixels, or [`UNREACHABLE_DISTANCE`]
    pub distance: u64,
    /// Cell centers from start to goal (empty if unreachable)
    pub path: Vec<PixelPoint>,
    /// Why the search failed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<PathFailure>,
}

impl PathResult {
    /// A successful result
    pub fn found(distance: u64, path: Vec<PixelPoint>) -> Self {
        Self {
            distance,
            path,
            failure: None,
        }
    }

    /// The sentinel "no path" result
    pub fn unreachable(reason: PathFailure) -> Self {
        Self {
            distance: UNREACHABLE_DISTANCE,
            path: Vec::new(),
            failure: Some(reason),
        }
    }

    /// Was a path found?
    #[inline]
    pub fn is_reachable(&self) -> bool {
        !is_unreachable(self.distance)
    }
}

/// A node in the A* open set
#[derive(Clone, Debug)]
pub(crate) struct AStarNode {
    pub coord: GridCoord,
    pub g_cost: u64,
    pub f_cost: u64,
    /// Insertion counter; equal f-costs pop first-in first-out
    pub seq: u64,
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
