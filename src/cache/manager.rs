//! Cache Manager Module
//!
//! Bounded key-value cache with TTL expiry and oldest-insertion-first eviction.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::stats::Counters;
use crate::cache::{CacheEntry, CacheStats};
use crate::clock::{Clock, SystemClock};

// == Cache Manager ==
/// Bounded, time-expiring cache.
///
/// Eviction removes the entry with the oldest insertion time, not the least
/// recently read one. Re-setting a key is the only way to refresh it.
pub struct CacheManager<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Time-to-live in seconds
    ttl: u64,
    /// Time source for insertion and expiry checks
    clock: Arc<dyn Clock>,
    /// Sequence number handed to the next inserted entry
    next_sequence: u64,
    /// Lifetime counters
    counters: Counters,
}

impl<V: Clone> CacheManager<V> {
    // == Constructor ==
    /// Creates a cache reading wall-clock time.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `ttl` - Seconds an entry stays readable after insertion
    pub fn new(max_size: usize, ttl: u64) -> Self {
        Self::with_clock(max_size, ttl, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(max_size: usize, ttl: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            ttl,
            clock,
            next_sequence: 0,
            counters: Counters::default(),
        }
    }

    fn ttl_ms(&self) -> u64 {
        self.ttl.saturating_mul(1000)
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// When the cache already holds `max_size` entries the oldest one is
    /// evicted first, even if `key` itself is present. Overwriting resets the
    /// entry's timestamp and hit counter.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if self.max_size == 0 {
            debug!(key = %key, "cache has zero capacity, value dropped");
            return;
        }
        if self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let entry = CacheEntry::new(value, self.clock.now_ms(), sequence);
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// An expired entry is removed and reported as a miss. A hit increments
    /// the entry's hit counter.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            self.counters.record_miss();
            return None;
        };

        if entry.is_expired(now, ttl_ms) {
            self.entries.remove(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            debug!(key, "cache entry expired on read");
            return None;
        }

        entry.hits += 1;
        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Size ==
    /// Sweeps expired entries, then returns how many remain.
    pub fn size(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, ttl_ms));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.counters.record_expirations(removed);
            debug!(removed, "swept expired cache entries");
        }
        removed
    }

    // == Stats ==
    /// Returns current statistics without sweeping expired entries first.
    pub fn get_stats(&self) -> CacheStats {
        let total_hits = self.entries.values().map(|entry| entry.hits).sum();
        CacheStats::new(self.entries.len(), self.max_size, total_hits, self.counters)
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.inserted_at, entry.sequence))
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.counters.record_eviction();
            debug!(key = %key, "evicted oldest cache entry");
        }
    }

    /// Number of entries held, without sweeping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// TTL in seconds.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }
}

impl<V> fmt::Debug for CacheManager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}
