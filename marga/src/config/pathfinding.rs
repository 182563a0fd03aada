//! Pathfinding configuration section.

use serde::{Deserialize, Serialize};

use crate::pathfinding::PathfinderConfig;

use super::defaults;

/// Grid pathfinder settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathfindingSection {
    /// BFS cap (cells) when snapping a blocked endpoint
    #[serde(default = "defaults::fallback_radius")]
    pub fallback_radius: u32,
}

impl Default for PathfindingSection {
    fn default() -> Self {
        Self {
            fallback_radius: defaults::fallback_radius(),
        }
    }
}

impl PathfindingSection {
    /// Convert to PathfinderConfig for a given cell size
    pub fn to_pathfinder_config(&self, cell_size: u32) -> PathfinderConfig {
        PathfinderConfig {
            cell_size,
            fallback_radius: self.fallback_radius,
        }
    }
}
