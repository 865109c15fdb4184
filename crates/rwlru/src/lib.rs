//! # rwlru
//!
//! Fixed-capacity, thread-safe key/value cache with LRU eviction.
//!
//! ## Architecture
//! - **Store**: AHash map from key to value (O(1))
//! - **Recency list**: Doubly-linked list of keys for eviction (O(1))
//! - **Guard**: One `parking_lot::RwLock` over both, so every operation is atomic
//!
//! ```
//! use rwlru::LruCache;
//!
//! let cache = LruCache::new(2).unwrap();
//! cache.set("a", 1).unwrap();
//! cache.set("b", 2).unwrap();
//! cache.get(&"a").unwrap();
//! cache.set("c", 3).unwrap(); // evicts "b"
//!
//! assert_eq!(cache.get(&"b").unwrap(), None);
//! assert_eq!(cache.get(&"a").unwrap(), Some(1));
//!
//! // Snapshots are plain hash collections over `rwlru::RandomState`
//! let mut expected = rwlru::KeySet::with_hasher(rwlru::RandomState::new());
//! expected.extend(["a", "c"]);
//! assert_eq!(cache.keys().unwrap(), expected);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;
mod recency;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use lru::{KeySet, ValueMap};
pub use stats::CacheStats;

/// Hasher used by [`KeySet`] and [`ValueMap`] snapshots
pub use ahash::RandomState;
