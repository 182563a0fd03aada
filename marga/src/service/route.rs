//! Route building: from location ids to an ordered, costed tour.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, DistanceCache, DistanceStore, NodeKey};
use crate::core::PixelPoint;
use crate::error::{Result, RouteError};
use crate::geometry::{WalkableArea, WalkableConfig};
use crate::layout::{Layout, Location};
use crate::optimizer::{OptimizerConfig, RouteOptimizer};
use crate::pathfinding::{BlockingStrategy, GridPathfinder, PathfinderConfig, is_unreachable};

use super::stores::{AuditSink, LayoutStore, LocationStore, PickingItemStore};

/// Tunables for a route build
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Pixels per grid cell
    pub cell_size: u32,
    /// Offset from a location's edge into the aisle (pixels)
    pub front_point_delta: f64,
    /// Block by walkable-polygon containment instead of rectangle overlap
    pub use_walkable_polygon: bool,
    /// Erosion distance (pixels) applied to the walkable polygon
    pub cart_clearance: f64,
    /// BFS cap (cells) for blocked endpoints
    pub fallback_radius: u32,
    /// Tour optimizer settings
    pub optimizer: OptimizerConfig,
    /// Polygon tracing settings
    pub walkable: WalkableConfig,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            cell_size: 25,
            front_point_delta: 10.0,
            use_walkable_polygon: false,
            cart_clearance: 0.0,
            fallback_radius: 20,
            optimizer: OptimizerConfig::default(),
            walkable: WalkableConfig::default(),
        }
    }
}

impl RouteOptions {
    fn pathfinder_config(&self) -> PathfinderConfig {
        PathfinderConfig {
            cell_size: self.cell_size,
            fallback_radius: self.fallback_radius,
        }
    }
}

/// One walked leg between consecutive stops
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Origin node
    pub from: NodeKey,
    /// Destination node
    pub to: NodeKey,
    /// Leg length (pixels), or the sentinel
    pub distance: u64,
    /// Cell centers walked
    pub path: Vec<PixelPoint>,
}

impl RouteLeg {
    /// Leg has a real path
    pub fn is_reachable(&self) -> bool {
        !is_unreachable(self.distance)
    }
}

/// A built route
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Location ids in visiting order
    pub location_ids: Vec<u64>,
    /// Sum of leg distances (pixels)
    pub total_distance: u64,
    /// Fingerprint of the layout the route was built on
    pub layout_hash: String,
    /// Full node order, `START` first and `END` last when present
    pub visiting_order: Vec<NodeKey>,
    /// Consecutive legs along `visiting_order`
    pub legs: Vec<RouteLeg>,
    /// Locations with no path from the start
    pub unreachable: Vec<u64>,
    /// Distance cache counters for this build
    pub cache_stats: CacheStats,
}

impl RouteResult {
    /// Locations that could not be reached from the start
    pub fn unreachable_locations(&self) -> &[u64] {
        &self.unreachable
    }

    /// Leg arriving at `location_id`
    pub fn leg_to(&self, location_id: u64) -> Option<&RouteLeg> {
        self.legs
            .iter()
            .find(|leg| leg.to == NodeKey::Location(location_id))
    }
}

/// External collaborators of the route service
#[derive(Clone)]
pub struct Collaborators {
    /// Floor layouts
    pub layouts: Arc<dyn LayoutStore>,
    /// Pick locations
    pub locations: Arc<dyn LocationStore>,
    /// Picking item records
    pub items: Arc<dyn PickingItemStore>,
    /// Audit log
    pub audit: Arc<dyn AuditSink>,
}

impl Collaborators {
    /// Every collaborator backed by one object
    pub fn shared<W>(warehouse: Arc<W>) -> Self
    where
        W: LayoutStore + LocationStore + PickingItemStore + AuditSink + 'static,
    {
        Self {
            layouts: warehouse.clone(),
            locations: warehouse.clone(),
            items: warehouse.clone(),
            audit: warehouse,
        }
    }
}

/// Builds picking routes and writes walking order back to picking items.
///
/// Holds no per-request state; one service can serve concurrent builds,
/// which then share its distance store.
#[derive(Clone)]
pub struct RouteService {
    pub(super) stores: Collaborators,
    distances: Arc<dyn DistanceStore>,
    pub(super) options: RouteOptions,
}

impl RouteService {
    /// Create a service
    pub fn new(stores: Collaborators, distances: Arc<dyn DistanceStore>, options: RouteOptions) -> Self {
        Self {
            stores,
            distances,
            options,
        }
    }

    /// Options in use
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Shared distance store
    pub fn distance_store(&self) -> &Arc<dyn DistanceStore> {
        &self.distances
    }

    /// Order `location_ids` into a walking tour on one floor.
    ///
    /// The tour starts at `start` (default: the layout's picking start) and
    /// ends at the layout's picking end when that differs from the start.
    /// Fails if the floor has no layout or any id has no location on it.
    /// Unreachable stops are not an error; see
    /// [`RouteResult::unreachable_locations`].
    pub fn build_route(
        &self,
        warehouse_id: u64,
        floor_id: u64,
        location_ids: &[u64],
        start: Option<PixelPoint>,
    ) -> Result<RouteResult> {
        let layout = self
            .stores
            .layouts
            .layout(warehouse_id, floor_id)?
            .ok_or(RouteError::LayoutNotFound {
                warehouse_id,
                floor_id,
            })?;

        let mut seen = HashSet::new();
        let ids: Vec<u64> = location_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
        let locations = self.load_locations(floor_id, &ids)?;

        let layout_hash = layout.hash();
        let start = start.unwrap_or(layout.picking_start);
        let end = layout.picking_end.filter(|&end| end != start);

        let blocking = self.blocking_strategy(&layout);
        let pathfinder = GridPathfinder::new(
            layout.width,
            layout.height,
            &blocking,
            self.options.pathfinder_config(),
        );

        let mut positions = HashMap::with_capacity(ids.len() + 2);
        positions.insert(NodeKey::Start, start);
        if let Some(end) = end {
            positions.insert(NodeKey::End, end);
        }
        for loc in &locations {
            let mut front = loc.front_point(self.options.front_point_delta);
            if let BlockingStrategy::Polygon { walkable, .. } = &blocking {
                front = walkable.snap_inside(front, self.options.walkable.nudge_epsilon);
            }
            positions.insert(NodeKey::Location(loc.id), front);
        }
        let resolve = |key: &NodeKey| positions.get(key).copied();

        let mut keys = Vec::with_capacity(ids.len() + 2);
        keys.push(NodeKey::Start);
        keys.extend(ids.iter().map(|&id| NodeKey::Location(id)));
        if end.is_some() {
            keys.push(NodeKey::End);
        }

        let scope = self.cache_scope(&layout_hash);
        let start_rows = start_scope(&scope, start);
        let mut cache = DistanceCache::new(
            warehouse_id,
            floor_id,
            scope,
            self.distances.as_ref(),
            &pathfinder,
        )
        .with_start_scope(start_rows);

        let optimizer = RouteOptimizer::new(self.options.optimizer.clone());
        let optimized = optimizer.optimize(&keys, end.is_some(), |a, b| {
            cache.get_distance(*a, *b, resolve).distance
        });

        let legs: Vec<RouteLeg> = optimized
            .route
            .windows(2)
            .map(|pair| {
                let result = cache.get_distance(pair[0], pair[1], resolve);
                RouteLeg {
                    from: pair[0],
                    to: pair[1],
                    distance: result.distance,
                    path: result.path,
                }
            })
            .collect();

        let unreachable: Vec<u64> = ids
            .iter()
            .copied()
            .filter(|&id| {
                is_unreachable(
                    cache
                        .get_distance(NodeKey::Start, NodeKey::Location(id), resolve)
                        .distance,
                )
            })
            .collect();
        if !unreachable.is_empty() {
            warn!(
                "[RouteService] floor {}/{}: locations {:?} unreachable from start",
                warehouse_id, floor_id, unreachable
            );
        }

        let total_distance = legs.iter().map(|leg| leg.distance).sum();
        let cache_stats = cache.stats();
        debug!(
            "[RouteService] floor {}/{}: {} stops, {}px, cache {} hits / {} searches",
            warehouse_id,
            floor_id,
            ids.len(),
            total_distance,
            cache_stats.hits,
            cache_stats.searches
        );

        Ok(RouteResult {
            location_ids: optimized
                .route
                .iter()
                .filter_map(NodeKey::location_id)
                .collect(),
            total_distance,
            layout_hash,
            visiting_order: optimized.route,
            legs,
            unreachable,
            cache_stats,
        })
    }

    fn load_locations(&self, floor_id: u64, ids: &[u64]) -> Result<Vec<Location>> {
        let mut by_id: HashMap<u64, Location> = self
            .stores
            .locations
            .locations(floor_id, ids)?
            .into_iter()
            .map(|loc| (loc.id, loc))
            .collect();
        ids.iter()
            .map(|&id| {
                by_id
                    .remove(&id)
                    .ok_or(RouteError::LocationNotFound { location_id: id })
            })
            .collect()
    }

    /// Walls and fixed areas only; location footprints never block, since
    /// their front points sit right next to them.
    fn blocking_strategy(&self, layout: &Layout) -> BlockingStrategy {
        let obstacles = layout.obstacles();
        if !self.options.use_walkable_polygon {
            return BlockingStrategy::Rectangles(obstacles);
        }

        let area = WalkableArea::from_obstacles(
            layout.width,
            layout.height,
            &obstacles,
            self.options.cell_size,
            self.options.cart_clearance,
            &self.options.walkable,
        );
        if area.is_empty() {
            warn!(
                "[RouteService] floor {}/{}: walkable polygon is empty, blocking by rectangles",
                layout.warehouse_id, layout.floor_id
            );
            return BlockingStrategy::Rectangles(obstacles);
        }
        BlockingStrategy::Polygon {
            walkable: area,
            obstacles,
        }
    }

    /// Cache scope: the layout hash extended with every routing parameter
    /// that changes pairwise distances.
    fn cache_scope(&self, layout_hash: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"marga/scope/v2");
        hasher.update(layout_hash.as_bytes());
        hasher.update(&self.options.cell_size.to_le_bytes());
        hasher.update(&self.options.fallback_radius.to_le_bytes());
        hasher.update(&[u8::from(self.options.use_walkable_polygon)]);
        for v in [self.options.front_point_delta, self.options.cart_clearance] {
            hasher.update(&(v + 0.0).to_bits().to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Scope for pairs touching `START`: the floor scope plus the start point
/// actually used, so an overridden start never shares rows with another.
fn start_scope(scope: &str, start: PixelPoint) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"marga/start/v1");
    hasher.update(scope.as_bytes());
    for v in [start.x, start.y] {
        hasher.update(&(v + 0.0).to_bits().to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
