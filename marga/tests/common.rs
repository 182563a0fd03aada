//! Test utilities shared by the integration tests.
//!
//! Provides floor builders, random grids and a brute-force BFS reference.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use marga::cache::{DistanceStore, MemoryDistanceStore};
use marga::core::{BoolGrid, GridCoord, PixelPoint, Rect};
use marga::layout::{Layout, Location};
use marga::service::{Collaborators, InMemoryWarehouse, PickingItem, RouteOptions, RouteService};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const CELL: u32 = 25;

/// Install a logger once per test binary.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Random obstacle bitmap (`true` = blocked).
pub fn random_blocked(seed: u64, width: usize, height: usize, density: f64) -> BoolGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = BoolGrid::new(width, height, false);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            grid.set(GridCoord::new(x, y), rng.random_bool(density));
        }
    }
    grid
}

/// One rectangle per blocked cell.
pub fn cell_rects(blocked: &BoolGrid, cell_size: u32) -> Vec<Rect> {
    let mut rects = Vec::new();
    for y in 0..blocked.height() {
        for x in 0..blocked.width() {
            if blocked.at(x, y) {
                rects.push(Rect::from_cells(x, y, 1, 1, cell_size));
            }
        }
    }
    rects
}

/// Minimum number of 4-connected moves between two free cells, by BFS.
pub fn bfs_moves(blocked: &BoolGrid, start: GridCoord, goal: GridCoord) -> Option<u32> {
    let free = |c: GridCoord| blocked.in_bounds(c) && !blocked.get(c);
    if !free(start) || !free(goal) {
        return None;
    }
    let mut dist = vec![u32::MAX; blocked.width() * blocked.height()];
    let idx = |c: GridCoord| c.y as usize * blocked.width() + c.x as usize;
    dist[idx(start)] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[idx(current)]);
        }
        for next in current.neighbors_4() {
            if free(next) && dist[idx(next)] == u32::MAX {
                dist[idx(next)] = dist[idx(current)] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Random free cell, if any.
pub fn random_free_cell(rng: &mut StdRng, blocked: &BoolGrid) -> Option<GridCoord> {
    let free: Vec<GridCoord> = (0..blocked.height() as i32)
        .flat_map(|y| (0..blocked.width() as i32).map(move |x| GridCoord::new(x, y)))
        .filter(|&c| !blocked.get(c))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// The 500x500 floor from the routing scenario: a wall at x 200..220 from
/// the top down to `wall_bottom`, start at (10, 10), and two locations on
/// either side of the wall.
pub fn split_floor(wall_bottom: f64) -> Arc<InMemoryWarehouse> {
    let warehouse = Arc::new(InMemoryWarehouse::new());
    warehouse.put_layout(
        Layout::new(1, 1, 500.0, 500.0, PixelPoint::new(10.0, 10.0))
            .with_wall(Rect::new(200.0, 0.0, 220.0, wall_bottom)),
    );
    warehouse.put_location(Location::new(1, 1, Rect::new(50.0, 50.0, 70.0, 80.0)));
    warehouse.put_location(Location::new(2, 1, Rect::new(450.0, 50.0, 470.0, 80.0)));
    warehouse
}

/// Picking items: two at location 1, one at location 2.
pub fn add_items(warehouse: &InMemoryWarehouse) {
    warehouse.put_item(PickingItem::new(101, 1, "SKU-B"));
    warehouse.put_item(PickingItem::new(102, 2, "SKU-C"));
    warehouse.put_item(PickingItem::new(103, 1, "SKU-A"));
}

/// Service over `warehouse` with a fresh in-memory distance store.
pub fn service(warehouse: Arc<InMemoryWarehouse>) -> RouteService {
    service_with_store(warehouse, Arc::new(MemoryDistanceStore::new()))
}

/// Service over `warehouse` with the given distance store.
pub fn service_with_store(
    warehouse: Arc<InMemoryWarehouse>,
    store: Arc<dyn DistanceStore>,
) -> RouteService {
    RouteService::new(
        Collaborators::shared(warehouse),
        store,
        RouteOptions::default(),
    )
}
