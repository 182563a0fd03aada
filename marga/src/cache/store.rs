//! Persistence seam for cached distances.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::pathfinding::PathResult;

use super::key::CacheKey;

/// Storage for memoized pairwise distances.
///
/// Entries are append-only facts: once a key is present its value never
/// changes. Stores are shared between concurrent route builds, so
/// implementations must be thread-safe and `insert_if_absent` must not
/// create duplicates when two builds race on the same key.
pub trait DistanceStore: Send + Sync {
    /// Look up a cached result
    fn get(&self, key: &CacheKey) -> Result<Option<PathResult>>;

    /// Insert unless the key already exists. Returns whether a new entry
    /// was written.
    fn insert_if_absent(&self, key: CacheKey, value: PathResult) -> Result<bool>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// No entries stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store, shareable across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryDistanceStore {
    entries: RwLock<HashMap<CacheKey, PathResult>>,
}

impl MemoryDistanceStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry computed under a different layout hash for this
    /// floor. Optional housekeeping: stale entries are never read anyway.
    pub fn retain_layout(&self, warehouse_id: u64, floor_id: u64, layout_hash: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|k, _| {
            k.warehouse_id != warehouse_id || k.floor_id != floor_id || k.layout_hash == layout_hash
        });
        before - entries.len()
    }
}

impl DistanceStore for MemoryDistanceStore {
    fn get(&self, key: &CacheKey) -> Result<Option<PathResult>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn insert_if_absent(&self, key: CacheKey, value: PathResult) -> Result<bool> {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Ok(false);
        }
        entries.insert(key, value);
        Ok(true)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NodeKey;
    use crate::core::PixelPoint;
    use std::sync::Arc;

    fn key(hash: &str, to: u64) -> CacheKey {
        CacheKey {
            warehouse_id: 1,
            floor_id: 1,
            layout_hash: hash.to_string(),
            from_key: NodeKey::Start,
            to_key: NodeKey::Location(to),
        }
    }

    #[test]
    fn test_insert_if_absent_keeps_first_value() {
        let store = MemoryDistanceStore::new();
        let first = PathResult::found(50, vec![PixelPoint::ZERO]);
        let second = PathResult::found(75, Vec::new());
        assert!(store.insert_if_absent(key("h", 1), first.clone()).unwrap());
        assert!(!store.insert_if_absent(key("h", 1), second).unwrap());
        assert_eq!(store.get(&key("h", 1)).unwrap(), Some(first));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_do_not_duplicate() {
        let store = Arc::new(MemoryDistanceStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50)
                        .filter(|&i| {
                            store
                                .insert_if_absent(key("h", i), PathResult::found(i, Vec::new()))
                                .unwrap()
                        })
                        .count()
                })
            })
            .collect();
        let written: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(written, 50);
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_retain_layout() {
        let store = MemoryDistanceStore::new();
        store.insert_if_absent(key("old", 1), PathResult::found(1, Vec::new())).unwrap();
        store.insert_if_absent(key("new", 1), PathResult::found(1, Vec::new())).unwrap();
        assert_eq!(store.retain_layout(1, 1, "new"), 1);
        assert!(store.get(&key("old", 1)).unwrap().is_none());
        assert!(store.get(&key("new", 1)).unwrap().is_some());
    }
}
