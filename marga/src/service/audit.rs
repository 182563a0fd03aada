//! Route build audit records.

use serde::{Deserialize, Serialize};

use crate::cache::NodeKey;

/// Algorithm name recorded with every audit
pub const ALGORITHM: &str = "nearest_insertion+2opt";

/// One record per walking-order update
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteAudit {
    /// Always [`ALGORITHM`]
    pub algorithm: String,
    /// Warehouse
    pub warehouse_id: u64,
    /// Floor
    pub floor_id: u64,
    /// Picking task, if the caller supplied one
    pub task_id: Option<u64>,
    /// Grid cell size (pixels)
    pub cell_size: u32,
    /// Front-point offset (pixels)
    pub front_point_delta: f64,
    /// Distinct locations routed
    pub location_count: usize,
    /// Total tour distance (pixels)
    pub total_distance: u64,
    /// Wall-clock time spent building the route
    pub elapsed_ms: u64,
    /// Full node order, `START` first
    pub visiting_order: Vec<NodeKey>,
    /// Layout fingerprint the route was computed under
    pub layout_hash: String,
    /// Locations that could only be reached through the sentinel
    pub unreachable: Vec<u64>,
}

impl RouteAudit {
    /// Serialize as a single JSON line
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
