/// Result of [`crate::Cache::get`].
///
/// Expiration is only checked on reads and expired entries are not purged, so a lookup can find
/// a value that is too old to count as a hit. That value is still handed out as
/// [`Lookup::Stale`] for callers that can make use of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup<V> {
    /// The key was found and is within the expiration duration.
    Fresh(V),
    /// The key was found but its last write is older than the expiration duration.
    Stale(V),
    /// The key is not in the cache.
    Missing,
}

impl<V> Lookup<V> {
    /// Returns `true` only for [`Lookup::Fresh`].
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Fresh(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Lookup::Stale(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    /// Returns the value, fresh or stale.
    pub fn value(&self) -> Option<&V> {
        match self {
            Lookup::Fresh(value) | Lookup::Stale(value) => Some(value),
            Lookup::Missing => None,
        }
    }

    /// Returns the value, fresh or stale.
    pub fn into_value(self) -> Option<V> {
        match self {
            Lookup::Fresh(value) | Lookup::Stale(value) => Some(value),
            Lookup::Missing => None,
        }
    }

    /// Returns the value only if it is fresh.
    pub fn fresh(self) -> Option<V> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Stale(_) | Lookup::Missing => None,
        }
    }

    /// Splits the lookup into the value (fresh or stale) and whether it counts as a hit.
    pub fn into_parts(self) -> (Option<V>, bool) {
        let found = self.is_found();
        (self.into_value(), found)
    }
}
