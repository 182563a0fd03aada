//! Writing a route back onto picking items.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cache::NodeKey;
use crate::error::{Result, RouteError};

use super::audit::{ALGORITHM, RouteAudit};
use super::route::{RouteResult, RouteService};
use super::stores::{PickingItem, WalkingOrderUpdate};

/// Result of [`RouteService::update_walking_order`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkingOrderOutcome {
    /// Updates written, in walking order
    pub updates: Vec<WalkingOrderUpdate>,
    /// Route the order was derived from
    pub route: RouteResult,
    /// Audit record for this run
    pub audit: RouteAudit,
    /// Whether the audit sink accepted `audit`
    pub audit_recorded: bool,
}

impl RouteService {
    /// Sequence a batch of picking items along an optimized route.
    ///
    /// Items receive 1-based, strictly increasing `walking_order` values in
    /// route order; items sharing a location are ordered by their sort key
    /// (then id). The first item at a location carries the leg distance
    /// into it, the others `0`. Updates are applied all-or-nothing, then one
    /// audit record is written. Once the items are sequenced the call
    /// succeeds; a rejected audit is logged and flagged in the outcome.
    pub fn update_walking_order(
        &self,
        item_ids: &[u64],
        warehouse_id: u64,
        floor_id: u64,
        task_id: Option<u64>,
    ) -> Result<WalkingOrderOutcome> {
        let mut seen = HashSet::new();
        let ids: Vec<u64> = item_ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let items = self.stores.items.items(&ids)?;
        if let Some(&missing) = ids.iter().find(|id| !items.iter().any(|item| item.id == **id)) {
            return Err(RouteError::PickingItemNotFound { item_id: missing });
        }

        let mut by_location: HashMap<u64, Vec<&PickingItem>> = HashMap::new();
        let mut location_ids = Vec::new();
        for item in &items {
            by_location
                .entry(item.location_id)
                .or_insert_with(|| {
                    location_ids.push(item.location_id);
                    Vec::new()
                })
                .push(item);
        }
        for group in by_location.values_mut() {
            group.sort_by(|a, b| a.sort_key.cmp(&b.sort_key).then(a.id.cmp(&b.id)));
        }

        let started = Instant::now();
        let route = self.build_route(warehouse_id, floor_id, &location_ids, None)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let updates = assign_walking_order(&route, &by_location);
        self.stores.items.apply_walking_order(&updates)?;

        let audit = RouteAudit {
            algorithm: ALGORITHM.to_string(),
            warehouse_id,
            floor_id,
            task_id,
            cell_size: self.options.cell_size,
            front_point_delta: self.options.front_point_delta,
            location_count: route.location_ids.len(),
            total_distance: route.total_distance,
            elapsed_ms,
            visiting_order: route.visiting_order.clone(),
            layout_hash: route.layout_hash.clone(),
            unreachable: route.unreachable.clone(),
        };
        let audit_recorded = match self.stores.audit.record(audit.clone()) {
            Ok(()) => true,
            Err(e) => {
                warn!("[RouteService] task {:?}: audit not recorded: {}", task_id, e);
                false
            }
        };

        info!(
            "[RouteService] task {:?}: {} items at {} locations sequenced, {}px in {}ms",
            task_id,
            updates.len(),
            audit.location_count,
            audit.total_distance,
            elapsed_ms
        );

        Ok(WalkingOrderOutcome {
            updates,
            route,
            audit,
            audit_recorded,
        })
    }
}

fn assign_walking_order(
    route: &RouteResult,
    by_location: &HashMap<u64, Vec<&PickingItem>>,
) -> Vec<WalkingOrderUpdate> {
    let mut updates = Vec::new();
    let mut order = 0u32;
    for leg in &route.legs {
        let NodeKey::Location(location_id) = leg.to else {
            continue;
        };
        let Some(group) = by_location.get(&location_id) else {
            continue;
        };
        for (i, item) in group.iter().enumerate() {
            order += 1;
            updates.push(WalkingOrderUpdate {
                item_id: item.id,
                walking_order: order,
                distance_from_previous: if i == 0 { leg.distance } else { 0 },
            });
        }
    }
    updates
}
