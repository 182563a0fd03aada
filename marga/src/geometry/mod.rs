//! Walkable floor geometry.
//!
//! Converts walkable bitmaps into polygons, erodes them to model cart
//! clearance, and answers containment and boundary queries. Also hosts the
//! rectangle packer used to store walls and fixed areas compactly.
//!
//! ```text
//!   BoolGrid ──trace──► rings ──simplify──► Polygon ──erode──► WalkableArea
//!      ▲                                                          │
//!      └──── rectangles_to_grid ◄── Rect list ◄── grid_to_rectangles
//! ```

mod contour;
mod erosion;
mod polygon;
mod rect_pack;
mod simplify;
mod walkable;

pub use contour::{bitmap_to_polygons, trace_rings};
pub use erosion::{erode, erode_ring};
pub use polygon::{Polygon, closest_point_on_segment, ring_contains, signed_area};
pub use rect_pack::{grid_to_rectangles, rectangles_to_grid};
pub use simplify::{simplify_polyline, simplify_ring};
pub use walkable::{WalkableArea, WalkableConfig};
