//! # Marga: Picking Route Optimization
//!
//! Orders the pick locations of a warehouse task into a short walking tour
//! and writes the resulting walking order back onto the picking items.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use marga::cache::MemoryDistanceStore;
//! use marga::core::{PixelPoint, Rect};
//! use marga::layout::{Layout, Location};
//! use marga::service::{Collaborators, InMemoryWarehouse, RouteOptions, RouteService};
//!
//! let warehouse = Arc::new(InMemoryWarehouse::new());
//! warehouse.put_layout(
//!     Layout::new(1, 1, 500.0, 500.0, PixelPoint::new(10.0, 10.0))
//!         .with_wall(Rect::new(200.0, 0.0, 220.0, 400.0)),
//! );
//! warehouse.put_location(Location::new(1, 1, Rect::new(50.0, 50.0, 70.0, 80.0)));
//! warehouse.put_location(Location::new(2, 1, Rect::new(450.0, 50.0, 470.0, 80.0)));
//!
//! let service = RouteService::new(
//!     Collaborators::shared(warehouse),
//!     Arc::new(MemoryDistanceStore::new()),
//!     RouteOptions::default(),
//! );
//! let route = service.build_route(1, 1, &[2, 1], None)?;
//! assert_eq!(route.location_ids, vec![1, 2]);
//! # Ok::<(), marga::RouteError>(())
//! ```
//!
//! ## Coordinates
//!
//! Everything is in layout pixel space with y pointing down. A grid cell
//! `(cx, cy)` covers `[cx * cell_size, (cx + 1) * cell_size)` on each axis
//! and paths pass through cell centers.
//!
//! ## Data Flow
//!
//! ```text
//!   Layout ──► layout_hash ─────────────────────────────┐
//!     │                                                 ▼
//!     ├──► BlockingStrategy ──► GridPathfinder ──► DistanceCache ◄──► DistanceStore
//!     │     (rectangles or                              │
//!     │      WalkableArea)                              ▼
//!   Locations ──► front points ──► NodeKeys ──► RouteOptimizer
//!                                                       │
//!                                                       ▼
//!                                   RouteResult ──► walking order + RouteAudit
//! ```
//!
//! ## Modules
//!
//! - [`core`]: points, grid coordinates, rectangles, bitmaps
//! - [`geometry`]: contour tracing, simplification, erosion, rectangle packing
//! - [`pathfinding`]: blocking strategies and grid A*
//! - [`layout`]: floor layouts, locations, front points, layout hashing
//! - [`cache`]: node keys, distance stores, the read-through distance cache
//! - [`optimizer`]: Nearest Insertion and 2-opt
//! - [`service`]: route building and walking-order updates
//! - [`config`]: YAML configuration

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod optimizer;
pub mod pathfinding;
pub mod service;

// Re-export main types at crate root
pub use error::{Result, RouteError};
pub use service::{RouteOptions, RouteResult, RouteService};

pub use cache::{DistanceStore, FileDistanceStore, MemoryDistanceStore, NodeKey};
pub use config::MargaConfig;
pub use layout::{Layout, Location};
pub use pathfinding::{UNREACHABLE_DISTANCE, is_unreachable};
