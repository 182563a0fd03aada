//! Core value types shared by every stage of route building.
//!
//! - [`GridCoord`] and [`PixelPoint`]: cell and pixel coordinates
//! - [`Rect`]: the one rectangle type for walls, fixed areas and locations
//! - [`BoolGrid`]: walkable bitmaps and obstacle masks

mod grid;
mod point;
mod rect;

pub use grid::BoolGrid;
pub use point::{GridCoord, PixelPoint};
pub use rect::Rect;
