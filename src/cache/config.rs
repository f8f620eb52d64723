use serde::{Deserialize, Serialize};
use std::num::NonZero;
use std::thread;
use std::time::Duration;

/// Construction parameters for [`crate::Cache::from_config`].
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Shard count hint, rounded up to the next power of two.
    pub shards: usize,
    pub capacity_per_shard: usize,
    /// Age after which a read no longer counts as a hit.
    pub expiration: Duration,
    /// Per-shard capacity of the second tier. `None` runs a plain LRU cache.
    pub second_tier_capacity: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let available_parallelism = thread::available_parallelism()
            .map(NonZero::get)
            .unwrap_or(1);

        Self {
            shards: available_parallelism * 4,
            capacity_per_shard: 1024,
            expiration: Duration::from_secs(60),
            second_tier_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_fills_missing_fields_with_defaults() {
        // given
        let json = r#"{ "capacity_per_shard": 16, "second_tier_capacity": 4 }"#;

        // when
        let config: CacheConfig = serde_json::from_str(json).unwrap();

        // then
        assert_eq!(config.capacity_per_shard, 16);
        assert_eq!(config.second_tier_capacity, Some(4));
        assert_eq!(config.expiration, Duration::from_secs(60));
        assert!(config.shards >= 4);
    }

    #[test]
    fn it_reads_the_expiration() {
        // given
        let json = r#"{ "shards": 2, "expiration": { "secs": 1, "nanos": 500000000 } }"#;

        // when
        let config: CacheConfig = serde_json::from_str(json).unwrap();

        // then
        assert_eq!(config.shards, 2);
        assert_eq!(config.expiration, Duration::from_millis(1_500));
        assert_eq!(config.second_tier_capacity, None);
    }
}
