use crate::cache::entry::Entry;
use crate::cache::lookup::Lookup;
use crate::cache::partition::Partition;
use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::trace;

/// The state guarded by one shard lock.
///
/// Writes always land in the first tier. With a second tier present, the first read after a
/// write moves the entry up, and it stays there until it is deleted, overwritten or evicted.
#[derive(Debug)]
pub(crate) struct Shard<K, V> {
    first_tier: Partition<K, Entry<V>>,
    second_tier: Option<Partition<K, Entry<V>>>,
}

impl<K, V> Shard<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            first_tier: Partition::with_capacity(capacity),
            second_tier: None,
        }
    }

    pub(crate) fn enable_second_tier(&mut self, capacity: usize) {
        self.second_tier = Some(Partition::with_capacity(capacity));
    }

    pub(crate) fn len(&self) -> usize {
        self.first_tier.len() + self.second_tier.as_ref().map_or(0, Partition::len)
    }

    /// Visits fresh entries, second tier first, until `visitor` breaks.
    pub(crate) fn for_each<F>(&self, expiration: Duration, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        let tiers = self.second_tier.iter().chain(Some(&self.first_tier));

        for tier in tiers {
            for (key, entry) in tier {
                if entry.is_expired(expiration) {
                    continue;
                }
                visitor(key, entry.value())?;
            }
        }

        ControlFlow::Continue(())
    }
}

impl<K, V> Shard<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub(crate) fn put(&mut self, key: K, value: V) {
        if let Some(second_tier) = self.second_tier.as_mut() {
            second_tier.delete(&key);
        }

        self.first_tier.put(key, Entry::new(value));
    }

    pub(crate) fn get<Q>(&mut self, key: &Q, expiration: Duration) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(second_tier) = self.second_tier.as_mut() else {
            return Self::lookup(self.first_tier.get(key), expiration);
        };

        match self.first_tier.delete_entry(key) {
            Some((key, entry)) => {
                let lookup = Self::lookup(Some(&entry), expiration);
                second_tier.put(key, entry);
                trace!("promoted entry to second tier");
                lookup
            }
            None => Self::lookup(second_tier.get(key), expiration),
        }
    }

    pub(crate) fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.first_tier.delete(key);
        if let Some(second_tier) = self.second_tier.as_mut() {
            second_tier.delete(key);
        }
    }

    pub(crate) fn update<Q, F>(&mut self, key: &Q, mutator: F) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V),
    {
        let tier = match self.second_tier.as_mut() {
            Some(second_tier) if second_tier.contains(key) => second_tier,
            _ => &mut self.first_tier,
        };

        tier.update(key, |entry| mutator(entry.value_mut()))
    }

    fn lookup(entry: Option<&Entry<V>>, expiration: Duration) -> Lookup<V> {
        match entry {
            Some(entry) if entry.is_expired(expiration) => Lookup::Stale(entry.value().clone()),
            Some(entry) => Lookup::Fresh(entry.value().clone()),
            None => Lookup::Missing,
        }
    }
}
