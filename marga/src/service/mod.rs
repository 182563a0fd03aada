//! Route service: the entry point that ties layouts, locations, the
//! pathfinder, the distance cache and the optimizer together.
//!
//! ```text
//! build_route
//!   layout store ──► layout + hash ──► blocking strategy ──► GridPathfinder
//!   location store ──► front points ──┐                          │
//!                                     ▼                          ▼
//!                         RouteOptimizer ◄── DistanceCache ◄── DistanceStore
//!
//! update_walking_order
//!   picking items ──► build_route ──► walking_order ──► item store + audit
//! ```

mod audit;
mod route;
mod stores;
mod walking_order;

pub use audit::{ALGORITHM, RouteAudit};
pub use route::{Collaborators, RouteLeg, RouteOptions, RouteResult, RouteService};
pub use stores::{
    AuditSink, InMemoryWarehouse, LayoutStore, LocationStore, PickingItem, PickingItemStore,
    WalkingOrderUpdate,
};
pub use walking_order::WalkingOrderOutcome;
