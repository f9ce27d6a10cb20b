//! # lrucache
//!
//! Fixed-capacity Least-Recently-Used cache.
//!
//! ## Architecture
//! - **Key index**: AHash map from key to arena slot (O(1) lookup)
//! - **Recency list**: doubly-linked list threaded through the slot arena,
//!   head = most recently used, tail = next eviction (O(1) promote/evict)
//! - **Facade**: [`StringCache`] wraps the generic [`LruCache`] with
//!   string keys, `KeyNotFound` errors and hit/miss statistics
//!
//! Both `get` and `put` reorder entries, so both take `&mut self`. Nothing
//! here is synchronized; callers sharing a cache must serialize access.
//!
//! ```
//! use lrucache::StringCache;
//!
//! let mut cache = StringCache::new(3)?;
//! cache.put("1", "one");
//! cache.put("2", "two");
//! cache.put("3", "three");
//!
//! assert_eq!(cache.get("1")?, "one"); // "2" is now least recently used
//! cache.put("4", "four");
//!
//! assert_eq!(
//!     cache.get("2").unwrap_err().to_string(),
//!     "key '2' not found in cache"
//! );
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
pub mod lru;
mod stats;

pub use cache::StringCache;
pub use config::{parse_capacity, CacheConfig, CAPACITY_ENV, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::{LruCache, PutOutcome};
pub use stats::CacheStats;
