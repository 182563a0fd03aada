//! Memoized pairwise distances for one floor and layout version.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::pathfinding::{PathFailure, PathResult, PathSearch};

use super::key::{CacheKey, NodeKey};
use super::store::DistanceStore;

/// Counters collected by a [`DistanceCache`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that had to compute
    pub misses: u64,
    /// Pathfinder invocations
    pub searches: u64,
    /// Store reads or writes that failed and were bypassed
    pub store_errors: u64,
}

/// Read-through cache in front of a [`PathSearch`].
///
/// Scoped to a single `(warehouse, floor, layout_hash)`; the store behind it
/// may be shared with other floors and other concurrent builds. Pairs that
/// touch `START` can be keyed under a separate start scope, so a moved start
/// only invalidates its own rows. Store
/// failures never fail a lookup: a failed read is treated as a miss and a
/// failed write still returns the computed result.
pub struct DistanceCache<'a> {
    warehouse_id: u64,
    floor_id: u64,
    layout_hash: String,
    start_scope: Option<String>,
    store: &'a dyn DistanceStore,
    search: &'a dyn PathSearch,
    stats: CacheStats,
}

impl<'a> DistanceCache<'a> {
    /// Create a cache for one floor under one layout version
    pub fn new(
        warehouse_id: u64,
        floor_id: u64,
        layout_hash: impl Into<String>,
        store: &'a dyn DistanceStore,
        search: &'a dyn PathSearch,
    ) -> Self {
        Self {
            warehouse_id,
            floor_id,
            layout_hash: layout_hash.into(),
            start_scope: None,
            store,
            search,
            stats: CacheStats::default(),
        }
    }

    /// Key pairs involving `START` under `scope` instead of the layout hash
    pub fn with_start_scope(mut self, scope: impl Into<String>) -> Self {
        self.start_scope = Some(scope.into());
        self
    }

    /// Layout version this cache reads and writes under
    pub fn layout_hash(&self) -> &str {
        &self.layout_hash
    }

    /// Counters so far
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn key(&self, from: NodeKey, to: NodeKey) -> CacheKey {
        let scope = match &self.start_scope {
            Some(scope) if from == NodeKey::Start || to == NodeKey::Start => scope,
            _ => &self.layout_hash,
        };
        CacheKey {
            warehouse_id: self.warehouse_id,
            floor_id: self.floor_id,
            layout_hash: scope.clone(),
            from_key: from,
            to_key: to,
        }
    }

    /// Distance and path from `from` to `to`.
    ///
    /// `resolver` maps a node key to its pixel position and is only invoked
    /// on a miss. A key it cannot resolve yields the sentinel result, which
    /// is not stored.
    pub fn get_distance<F>(&mut self, from: NodeKey, to: NodeKey, resolver: F) -> PathResult
    where
        F: Fn(&NodeKey) -> Option<PixelPoint>,
    {
        let key = self.key(from, to);

        match self.store.get(&key) {
            Ok(Some(hit)) => {
                self.stats.hits += 1;
                trace!("[DistanceCache] hit {} -> {}: {}", from, to, hit.distance);
                return hit;
            }
            Ok(None) => {}
            Err(e) => {
                self.stats.store_errors += 1;
                warn!("[DistanceCache] read failed for {} -> {}: {}", from, to, e);
            }
        }
        self.stats.misses += 1;

        let Some(start) = resolver(&from) else {
            warn!("[DistanceCache] cannot resolve node {}", from);
            return PathResult::unreachable(PathFailure::StartUnresolved);
        };
        let Some(goal) = resolver(&to) else {
            warn!("[DistanceCache] cannot resolve node {}", to);
            return PathResult::unreachable(PathFailure::GoalUnresolved);
        };

        self.stats.searches += 1;
        let result = self.search.shortest(start, goal);
        trace!("[DistanceCache] miss {} -> {}: {}", from, to, result.distance);

        if let Err(e) = self.store.insert_if_absent(key, result.clone()) {
            self.stats.store_errors += 1;
            warn!("[DistanceCache] write failed for {} -> {}: {}", from, to, e);
        }
        result
    }
}
