//! Collaborator interfaces and an in-memory implementation of all of them.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::layout::{Layout, Location};

use super::audit::RouteAudit;

/// A picking item awaiting sequencing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickingItem {
    /// Item id
    pub id: u64,
    /// Location the item is picked from
    pub location_id: u64,
    /// Secondary ordering among items at the same location (item code)
    pub sort_key: String,
    /// 1-based position in the walk, once sequenced
    #[serde(default)]
    pub walking_order: Option<u32>,
    /// Pixels walked from the previous stop, once sequenced
    #[serde(default)]
    pub distance_from_previous: Option<u64>,
}

impl PickingItem {
    /// Unsequenced item
    pub fn new(id: u64, location_id: u64, sort_key: impl Into<String>) -> Self {
        Self {
            id,
            location_id,
            sort_key: sort_key.into(),
            walking_order: None,
            distance_from_previous: None,
        }
    }
}

/// Sequencing result for one item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkingOrderUpdate {
    /// Item id
    pub item_id: u64,
    /// 1-based position in the walk
    pub walking_order: u32,
    /// Pixels walked from the previous stop
    pub distance_from_previous: u64,
}

/// Source of floor layouts
pub trait LayoutStore: Send + Sync {
    /// Layout of one floor, if defined
    fn layout(&self, warehouse_id: u64, floor_id: u64) -> Result<Option<Layout>>;
}

/// Source of pick locations
pub trait LocationStore: Send + Sync {
    /// Locations with the given ids on `floor_id`; unknown ids are omitted
    fn locations(&self, floor_id: u64, ids: &[u64]) -> Result<Vec<Location>>;
}

/// Owner of picking item records
pub trait PickingItemStore: Send + Sync {
    /// Items with the given ids; unknown ids are omitted
    fn items(&self, ids: &[u64]) -> Result<Vec<PickingItem>>;

    /// Write every update or none of them
    fn apply_walking_order(&self, updates: &[WalkingOrderUpdate]) -> Result<()>;
}

/// Destination for route audit records
pub trait AuditSink: Send + Sync {
    /// Persist one record
    fn record(&self, audit: RouteAudit) -> Result<()>;
}

/// Thread-safe in-memory warehouse backing every collaborator trait.
#[derive(Debug, Default)]
pub struct InMemoryWarehouse {
    layouts: RwLock<HashMap<(u64, u64), Layout>>,
    locations: RwLock<HashMap<u64, Location>>,
    items: RwLock<HashMap<u64, PickingItem>>,
    audits: RwLock<Vec<RouteAudit>>,
}

impl InMemoryWarehouse {
    /// Empty warehouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a floor layout
    pub fn put_layout(&self, layout: Layout) {
        self.layouts
            .write()
            .insert((layout.warehouse_id, layout.floor_id), layout);
    }

    /// Add or replace a location
    pub fn put_location(&self, location: Location) {
        self.locations.write().insert(location.id, location);
    }

    /// Add or replace a picking item
    pub fn put_item(&self, item: PickingItem) {
        self.items.write().insert(item.id, item);
    }

    /// Current state of one item
    pub fn item(&self, id: u64) -> Option<PickingItem> {
        self.items.read().get(&id).cloned()
    }

    /// Every audit recorded so far
    pub fn audits(&self) -> Vec<RouteAudit> {
        self.audits.read().clone()
    }
}

impl LayoutStore for InMemoryWarehouse {
    fn layout(&self, warehouse_id: u64, floor_id: u64) -> Result<Option<Layout>> {
        Ok(self.layouts.read().get(&(warehouse_id, floor_id)).cloned())
    }
}

impl LocationStore for InMemoryWarehouse {
    fn locations(&self, floor_id: u64, ids: &[u64]) -> Result<Vec<Location>> {
        let locations = self.locations.read();
        Ok(ids
            .iter()
            .filter_map(|id| locations.get(id))
            .filter(|loc| loc.floor_id == floor_id)
            .cloned()
            .collect())
    }
}

impl PickingItemStore for InMemoryWarehouse {
    fn items(&self, ids: &[u64]) -> Result<Vec<PickingItem>> {
        let items = self.items.read();
        Ok(ids.iter().filter_map(|id| items.get(id)).cloned().collect())
    }

    fn apply_walking_order(&self, updates: &[WalkingOrderUpdate]) -> Result<()> {
        let mut items = self.items.write();
        if let Some(missing) = updates.iter().find(|u| !items.contains_key(&u.item_id)) {
            return Err(RouteError::PickingItemNotFound {
                item_id: missing.item_id,
            });
        }
        for update in updates {
            if let Some(item) = items.get_mut(&update.item_id) {
                item.walking_order = Some(update.walking_order);
                item.distance_from_previous = Some(update.distance_from_previous);
            }
        }
        Ok(())
    }
}

impl AuditSink for InMemoryWarehouse {
    fn record(&self, audit: RouteAudit) -> Result<()> {
        self.audits.write().push(audit);
        Ok(())
    }
}
