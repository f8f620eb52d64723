use std::hash::BuildHasher;

/// Builds IEEE CRC-32 hashers for routing keys to shards.
///
/// The checksum is deterministic across processes and spreads bits well enough for a bitmask
/// over a power-of-two shard count. Any other [`BuildHasher`] can be plugged into
/// [`crate::Cache::with_hasher`] instead; only the low 32 bits of its output are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32State;

impl BuildHasher for Crc32State {
    type Hasher = crc32fast::Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        crc32fast::Hasher::new()
    }
}
