//! Floor layouts and pick locations.
//!
//! These are the records the route engine reads from the external layout
//! and location stores, with every rectangle already collapsed into
//! [`Rect`] at the boundary.

mod front_point;
mod hash;

pub use front_point::compute_front_point;
pub use hash::layout_hash;

use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, Rect};

/// Physical layout of one warehouse floor, in pixel space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Owning warehouse
    pub warehouse_id: u64,
    /// Floor within the warehouse
    pub floor_id: u64,
    /// Floor width in pixels
    pub width: f64,
    /// Floor height in pixels
    pub height: f64,
    /// Wall rectangles
    #[serde(default)]
    pub walls: Vec<Rect>,
    /// Fixed areas (pillars, offices, docks)
    #[serde(default)]
    pub fixed_areas: Vec<Rect>,
    /// Where picking tours begin
    pub picking_start: PixelPoint,
    /// Where picking tours end, if not back at an arbitrary last stop
    #[serde(default)]
    pub picking_end: Option<PixelPoint>,
}

impl Layout {
    /// Open floor with no obstacles
    pub fn new(warehouse_id: u64, floor_id: u64, width: f64, height: f64, picking_start: PixelPoint) -> Self {
        Self {
            warehouse_id,
            floor_id,
            width,
            height,
            walls: Vec::new(),
            fixed_areas: Vec::new(),
            picking_start,
            picking_end: None,
        }
    }

    /// Add a wall
    pub fn with_wall(mut self, wall: Rect) -> Self {
        self.walls.push(wall);
        self
    }

    /// Add a fixed area
    pub fn with_fixed_area(mut self, area: Rect) -> Self {
        self.fixed_areas.push(area);
        self
    }

    /// Set the picking end point
    pub fn with_picking_end(mut self, end: PixelPoint) -> Self {
        self.picking_end = Some(end);
        self
    }

    /// Walls followed by fixed areas: everything a cart must route around
    pub fn obstacles(&self) -> Vec<Rect> {
        self.walls.iter().chain(&self.fixed_areas).copied().collect()
    }

    /// Content fingerprint, see [`layout_hash`]
    pub fn hash(&self) -> String {
        layout_hash(self)
    }
}

/// A pick location: a rack slot or bin footprint on one floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location id
    pub id: u64,
    /// Floor the location sits on
    pub floor_id: u64,
    /// Footprint in pixels
    pub rect: Rect,
}

impl Location {
    /// Create a location
    pub fn new(id: u64, floor_id: u64, rect: Rect) -> Self {
        Self { id, floor_id, rect }
    }

    /// Aisle access point, see [`compute_front_point`]
    pub fn front_point(&self, delta: f64) -> PixelPoint {
        compute_front_point(&self.rect, delta)
    }
}
