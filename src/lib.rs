//! docstore - An in-memory document store and TTL cache
//!
//! Provides named tables of JSON records with predicate queries, and a
//! bounded cache with time-based expiry, plus an HTTP API over both.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{DocumentStore, Query, Record, Schema};
pub use tasks::spawn_sweep_task;
