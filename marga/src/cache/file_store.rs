//! Append-only JSON-lines distance store.
//!
//! Each line is one [`CacheRow`]. The file is read once on open; new rows
//! are appended and flushed as they are inserted. Duplicate keys in the
//! file (from older writers without the uniqueness check) are tolerated:
//! the first row wins.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::Result;
use crate::pathfinding::{PathFailure, PathResult};

use super::key::{CacheKey, NodeKey};
use super::store::DistanceStore;

/// One persisted cache entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheRow {
    /// Warehouse
    pub warehouse_id: u64,
    /// Floor
    pub floor_id: u64,
    /// Layout fingerprint
    pub layout_hash: String,
    /// Origin node
    pub from_key: NodeKey,
    /// Destination node
    pub to_key: NodeKey,
    /// Distance in pixels
    pub distance: u64,
    /// Walked cell centers
    pub path: Vec<PixelPoint>,
    /// Failure reason for sentinel rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<PathFailure>,
}

impl CacheRow {
    fn new(key: CacheKey, value: PathResult) -> Self {
        Self {
            warehouse_id: key.warehouse_id,
            floor_id: key.floor_id,
            layout_hash: key.layout_hash,
            from_key: key.from_key,
            to_key: key.to_key,
            distance: value.distance,
            path: value.path,
            failure: value.failure,
        }
    }

    fn into_entry(self) -> (CacheKey, PathResult) {
        let key = CacheKey {
            warehouse_id: self.warehouse_id,
            floor_id: self.floor_id,
            layout_hash: self.layout_hash,
            from_key: self.from_key,
            to_key: self.to_key,
        };
        let value = PathResult {
            distance: self.distance,
            path: self.path,
            failure: self.failure,
        };
        (key, value)
    }
}

/// File-backed distance store
#[derive(Debug)]
pub struct FileDistanceStore {
    path: PathBuf,
    entries: RwLock<HashMap<CacheKey, PathResult>>,
    writer: Mutex<BufWriter<File>>,
}

impl FileDistanceStore {
    /// Open (or create) a store at `path`, loading existing rows
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = HashMap::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for (line_no, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<CacheRow>(&line) {
                    Ok(row) => {
                        let (key, value) = row.into_entry();
                        entries.entry(key).or_insert(value);
                    }
                    Err(e) => warn!(
                        "[DistanceCache] skipping malformed row {} in {}: {}",
                        line_no + 1,
                        path.display(),
                        e
                    ),
                }
            }
        }
        debug!(
            "[DistanceCache] opened {} with {} entries",
            path.display(),
            entries.len()
        );

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DistanceStore for FileDistanceStore {
    fn get(&self, key: &CacheKey) -> Result<Option<PathResult>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn insert_if_absent(&self, key: CacheKey, value: PathResult) -> Result<bool> {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Ok(false);
        }

        let line = serde_json::to_string(&CacheRow::new(key.clone(), value.clone()))?;
        {
            let mut writer = self.writer.lock();
            writeln!(writer, "{}", line)?;
            writer.flush()?;
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

    fn key(to: u64) -> CacheKey {
        CacheKey {
            warehouse_id: 1,
            floor_id: 2,
            layout_hash: "abc".to_string(),
            from_key: NodeKey::Start,
            to_key: NodeKey::Location(to),
        }
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances.jsonl");

        let value = PathResult::found(75, vec![PixelPoint::new(12.5, 12.5)]);
        {
            let store = FileDistanceStore::open(&path).unwrap();
            assert!(store.insert_if_absent(key(1), value.clone()).unwrap());
            assert!(!store.insert_if_absent(key(1), PathResult::found(1, Vec::new())).unwrap());
        }

        let reopened = FileDistanceStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get(&key(1)).unwrap(), Some(value));
    }

    #[test]
    fn test_unreachable_rows_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances.jsonl");
        {
            let store = FileDistanceStore::open(&path).unwrap();
            let sentinel = PathResult::unreachable(PathFailure::NoPath);
            store.insert_if_absent(key(9), sentinel).unwrap();
        }
        let reopened = FileDistanceStore::open(&path).unwrap();
        let value = reopened.get(&key(9)).unwrap().unwrap();
        assert!(!value.is_reachable());
        assert!(value.path.is_empty());
        assert_eq!(value.failure, Some(PathFailure::NoPath));
    }

    #[test]
    fn test_malformed_and_duplicate_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances.jsonl");
        let first = serde_json::to_string(&CacheRow::new(key(1), PathResult::found(10, Vec::new()))).unwrap();
        let dup = serde_json::to_string(&CacheRow::new(key(1), PathResult::found(99, Vec::new()))).unwrap();
        std::fs::write(&path, format!("{}\nnot json\n\n{}\n", first, dup)).unwrap();

        let store = FileDistanceStore::open(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key(1)).unwrap().unwrap().distance, 10);
    }
}
