//! Cache Statistics Module
//!
//! Snapshot of cache occupancy and hit counts, plus lifetime counters for
//! misses, evictions and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, expired ones included until swept
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Sum of hit counters over the entries currently held
    pub total_hits: u64,
    /// `total_hits / size`, or 0.0 when empty
    pub average_hits: f64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed to make room
    pub evictions: u64,
    /// Entries removed for outliving the TTL
    pub expirations: u64,
}

// == Counters ==
/// Lifetime counters kept by the cache manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counters {
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl Counters {
    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Adds `count` expired removals.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

impl CacheStats {
    /// Builds a snapshot from occupancy figures and the lifetime counters.
    pub fn new(size: usize, max_size: usize, total_hits: u64, counters: Counters) -> Self {
        let average_hits = if size == 0 {
            0.0
        } else {
            total_hits as f64 / size as f64
        };
        Self {
            size,
            max_size,
            total_hits,
            average_hits,
            misses: counters.misses,
            evictions: counters.evictions,
            expirations: counters.expirations,
        }
    }
}
