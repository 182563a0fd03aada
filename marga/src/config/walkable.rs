//! Walkable geometry configuration section.

use serde::{Deserialize, Serialize};

use crate::geometry::WalkableConfig;

use super::defaults;

/// Contour tracing and erosion settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalkableSection {
    /// Douglas-Peucker tolerance (grid units)
    #[serde(default = "defaults::simplify_epsilon")]
    pub simplify_epsilon: f64,

    /// Minimum ring corners kept after tracing
    #[serde(default = "defaults::min_contour_points")]
    pub min_contour_points: usize,

    /// Sliver threshold after erosion (pixels)
    #[serde(default = "defaults::min_edge_length")]
    pub min_edge_length: f64,

    /// Nudge offset for snapping points inside (pixels)
    #[serde(default = "defaults::nudge_epsilon")]
    pub nudge_epsilon: f64,
}

impl Default for WalkableSection {
    fn default() -> Self {
        Self {
            simplify_epsilon: defaults::simplify_epsilon(),
            min_contour_points: defaults::min_contour_points(),
            min_edge_length: defaults::min_edge_length(),
            nudge_epsilon: defaults::nudge_epsilon(),
        }
    }
}

impl WalkableSection {
    /// Convert to WalkableConfig
    pub fn to_walkable_config(&self) -> WalkableConfig {
        WalkableConfig {
            simplify_epsilon: self.simplify_epsilon,
            min_contour_points: self.min_contour_points,
            min_edge_length: self.min_edge_length,
            nudge_epsilon: self.nudge_epsilon,
        }
    }
}
