//! Routing configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Route building settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutingSection {
    /// Pixels per grid cell
    #[serde(default = "defaults::cell_size")]
    pub cell_size: u32,

    /// Offset from a location's edge into the aisle (pixels)
    #[serde(default = "defaults::front_point_delta")]
    pub front_point_delta: f64,

    /// Block by walkable-polygon containment instead of rectangle overlap
    #[serde(default)]
    pub use_walkable_polygon: bool,

    /// Erosion distance (pixels) for the walkable polygon
    #[serde(default)]
    pub cart_clearance: f64,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            cell_size: defaults::cell_size(),
            front_point_delta: defaults::front_point_delta(),
            use_walkable_polygon: false,
            cart_clearance: 0.0,
        }
    }
}
