//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Insertion order, used to break timestamp ties on eviction
    pub sequence: u64,
    /// Number of successful reads since insertion
    pub hits: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry with zero hits.
    pub fn new(value: V, inserted_at: u64, sequence: u64) -> Self {
        Self {
            value,
            inserted_at,
            sequence,
            hits: 0,
        }
    }

    /// Milliseconds since insertion. A clock behind the insertion time reads as zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl_ms`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it expires once the age is strictly greater.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }

    /// Remaining lifetime in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64, ttl_ms: u64) -> u64 {
        ttl_ms.saturating_sub(self.age_ms(now_ms))
    }
}
