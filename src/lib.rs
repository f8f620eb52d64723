//! A thread-safe, sharded LRU cache with two-access promotion and lazy expiration.
//!
//! # Features
//!
//! - Thread-safe by default - no need for explicit synchronization
//! - O(1) put, get and delete on an index-linked LRU list that recycles its nodes on eviction
//! - Sharded design to reduce contention during concurrent access
//! - Optional second tier: an entry read once after its last write is moved to a separate
//!   partition, shielding it from keys that are written and never read again
//! - Lazy expiration: entries older than the expiration duration are reported as stale on read
//!   and are never purged eagerly
//! - No unsafe code
//!
//! # Examples
//!
//! Basic usage with string keys and values:
//!
//! ```rust
//! use std::time::Duration;
//! use tiered_lru::{Cache, Lookup};
//!
//! // 16 shards of 64 entries each, values expire after one minute
//! let cache = Cache::new(16, 64, Duration::from_secs(60));
//!
//! cache.put("key1", "value1");
//! assert_eq!(cache.get("key1"), Lookup::Fresh("value1"));
//! assert_eq!(cache.get("key2"), Lookup::Missing);
//! ```
//!
//! Promoting entries that are read back:
//!
//! ```rust
//! use std::time::Duration;
//! use tiered_lru::{Cache, Lookup};
//!
//! let cache = Cache::new(1, 1, Duration::from_secs(60)).enable_second_tier(1);
//!
//! cache.put("hot", 1);
//! cache.get("hot"); // moves "hot" to the second tier
//! cache.put("cold", 2); // fills the first tier without touching "hot"
//!
//! assert_eq!(cache.get("hot"), Lookup::Fresh(1));
//! ```
//!
//! Reading expired values:
//!
//! ```rust
//! use std::thread;
//! use std::time::Duration;
//! use tiered_lru::{Cache, Lookup};
//!
//! let cache = Cache::new(4, 64, Duration::from_millis(1));
//! cache.put("key1", "value1");
//! thread::sleep(Duration::from_millis(10));
//!
//! let (value, found) = cache.get("key1").into_parts();
//! assert_eq!(value, Some("value1"));
//! assert!(!found);
//! ```
//!
//! Thread-safe usage across multiple threads:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use tiered_lru::{Cache, Lookup};
//!
//! let cache = Arc::new(Cache::new(8, 100, Duration::from_secs(60)));
//! cache.put("key1", "value1");
//!
//! let cache_in_arc = Arc::clone(&cache);
//! let handle = thread::spawn(move || {
//!     cache_in_arc.put("key2", "value2");
//! });
//!
//! handle.join().unwrap();
//!
//! assert_eq!(cache.get("key1"), Lookup::Fresh("value1"));
//! assert_eq!(cache.get("key2"), Lookup::Fresh("value2"));
//! ```

#![forbid(unsafe_code)]
pub mod cache;

pub use cache::config::CacheConfig;
pub use cache::{Cache, Crc32State, Iter, Lookup, MAX_SHARDS, Partition};
