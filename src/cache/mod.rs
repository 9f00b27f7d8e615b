//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and oldest-first eviction.

mod entry;
mod manager;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use manager::CacheManager;
pub use stats::{CacheStats, Counters};
