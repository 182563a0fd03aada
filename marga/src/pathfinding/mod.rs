//! Shortest paths on a discretized warehouse floor.
//!
//! A floor is a grid of square cells. A cell is blocked when it overlaps a
//! wall or fixed area ([`BlockingStrategy::Rectangles`]). With a walkable
//! polygon ([`BlockingStrategy::Polygon`]) a cell whose center falls outside
//! it is blocked too. Paths are sequences of cell centers.

pub mod astar;
mod blocking;

pub use astar::{
    GridPathfinder, PathFailure, PathResult, PathfinderConfig, UNREACHABLE_DISTANCE,
    is_unreachable,
};
pub use blocking::BlockingStrategy;

use crate::core::PixelPoint;

/// Point-to-point shortest path search.
///
/// The distance cache only depends on this trait, so tests can count or
/// script the searches it triggers.
pub trait PathSearch {
    /// Shortest path between two pixel points; never fails (see
    /// [`UNREACHABLE_DISTANCE`]).
    fn shortest(&self, start: PixelPoint, goal: PixelPoint) -> PathResult;
}
