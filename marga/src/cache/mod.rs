//! Distance memoization keyed by floor, layout version and node pair.
//!
//! [`DistanceCache`] is the per-build view; [`DistanceStore`] is the
//! shared backing table. Entries are never invalidated explicitly: a
//! geometry change produces a new layout hash and old rows are simply
//! no longer addressed.

mod distance_cache;
mod file_store;
mod key;
mod store;

pub use distance_cache::{CacheStats, DistanceCache};
pub use file_store::{CacheRow, FileDistanceStore};
pub use key::{CacheKey, NodeKey};
pub use store::{DistanceStore, MemoryDistanceStore};
