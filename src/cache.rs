use crate::CacheConfig;
use parking_lot::Mutex;
use shard::Shard;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::debug;

pub(crate) mod config;
mod entry;
pub(crate) mod hasher;
pub(crate) mod lookup;
mod node;
pub(crate) mod partition;
mod shard;

pub use hasher::Crc32State;
pub use lookup::Lookup;
pub use partition::{Iter, Partition};

pub(crate) type RandomState = ahash::RandomState;

/// Shard count hints are clamped to this before rounding to a power of two.
pub const MAX_SHARDS: usize = 1 << 16;

/// Thread-safe LRU cache, sharded by key hash, with optional second-tier promotion and lazy
/// expiration.
///
/// Keys are routed to one of a power-of-two number of shards. Every shard has its own lock and
/// its own fixed-capacity LRU partitions, so operations on different shards never contend.
///
/// With [`Cache::enable_second_tier`], the first read after a write moves an entry into a
/// separate per-shard partition, where it is no longer pushed out by keys that are written once
/// and never read back. A new write moves the key back into the first tier.
///
/// Expiration is only evaluated on reads. Expired entries stay in place until evicted, deleted or
/// overwritten, and reads report them as [`Lookup::Stale`].
///
/// Wrap the cache in a [`std::sync::Arc`] to share it between threads. All operations only
/// require shared references to the cache.
#[derive(Debug)]
pub struct Cache<K, V, S = Crc32State> {
    hash_builder: S,
    shards: Box<[Mutex<Shard<K, V>>]>,
    mask: usize,
    expiration: Duration,
}

impl<K, V> Cache<K, V, Crc32State> {
    /// Creates a cache with `shards` shards of `capacity_per_shard` entries each.
    ///
    /// The shard count is clamped to `1..=`[`MAX_SHARDS`] and rounded up to the next power of
    /// two. A capacity of zero yields a cache that stores nothing.
    pub fn new(shards: usize, capacity_per_shard: usize, expiration: Duration) -> Self {
        Cache::with_hasher(shards, capacity_per_shard, expiration, Crc32State)
    }

    /// Creates a cache from `config`, enabling the second tier if one is configured.
    pub fn from_config(config: &CacheConfig) -> Self {
        let cache = Cache::new(config.shards, config.capacity_per_shard, config.expiration);

        match config.second_tier_capacity {
            Some(capacity) => cache.enable_second_tier(capacity),
            None => cache,
        }
    }
}

impl<K, V, S> Cache<K, V, S> {
    /// Creates a cache that routes keys to shards using `hash_builder`.
    pub fn with_hasher(
        shards: usize,
        capacity_per_shard: usize,
        expiration: Duration,
        hash_builder: S,
    ) -> Self {
        let number_of_shards = shards.clamp(1, MAX_SHARDS).next_power_of_two();

        let shards = (0..number_of_shards)
            .map(|_| Mutex::new(Shard::with_capacity(capacity_per_shard)))
            .collect();

        debug!(
            shards = number_of_shards,
            capacity_per_shard,
            ?expiration,
            "created cache"
        );

        Self {
            hash_builder,
            shards,
            mask: number_of_shards - 1,
            expiration,
        }
    }

    /// Adds a second-tier partition of `capacity_per_shard` entries to every shard.
    ///
    /// Calling this again replaces the second tier with empty partitions.
    pub fn enable_second_tier(mut self, capacity_per_shard: usize) -> Self {
        for shard in self.shards.iter_mut() {
            shard.get_mut().enable_second_tier(capacity_per_shard);
        }

        debug!(capacity_per_shard, "enabled second tier");

        self
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Number of entries held across all shards and tiers, including expired ones.
    ///
    /// Shards are locked one after another, so the count is not a consistent snapshot under
    /// concurrent writes.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every unexpired entry until `visitor` breaks.
    ///
    /// Each shard is locked while it is visited, second tier first, most recently used first
    /// within a tier. Recency is not updated. The visitor must not call back into the cache.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        for shard in self.shards.iter() {
            if shard.lock().for_each(self.expiration, &mut visitor).is_break() {
                return;
            }
        }
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    /// Inserts or overwrites `key` in the first tier, stamped with the current time.
    pub fn put(&self, key: K, value: V) {
        let mut shard = self.get_shard(&key).lock();
        shard.put(key, value);
    }

    /// Looks up `key`, refreshing its recency.
    ///
    /// This method clones the value when returning it. Consider wrapping your values in
    /// [`std::sync::Arc`] if cloning is too expensive for your use-case.
    pub fn get<Q>(&self, key: &Q) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut shard = self.get_shard(key).lock();
        shard.get(key, self.expiration)
    }

    /// Removes `key` from every tier.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut shard = self.get_shard(key).lock();
        shard.delete(key);
    }

    /// Mutates the value of `key` in place, in whichever tier holds it.
    ///
    /// The write timestamp and tier are left unchanged. Returns `false` if the key is absent.
    pub fn update<Q, F>(&self, key: &Q, mutator: F) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V),
    {
        let mut shard = self.get_shard(key).lock();
        shard.update(key, mutator)
    }

    fn get_shard<Q>(&self, key: &Q) -> &Mutex<Shard<K, V>>
    where
        Q: ?Sized + Hash,
    {
        &self.shards[self.shard_index(key)]
    }

    fn shard_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let hash = self.hash_builder.hash_one(key) as u32;
        hash as usize & self.mask
    }
}
