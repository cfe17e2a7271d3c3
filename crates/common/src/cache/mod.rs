//! Bounded in-memory cache with configurable eviction policies
//!
//! Callers own their cache instance instead of sharing ambient global state.
//! Capacity, TTL and the eviction policy are chosen per instance through
//! [`CacheConfig`].
//!
//! # Examples
//!
//! ## Simple LRU Cache
//! ```
//! use wastetrack_common::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<String, String> = Cache::new(CacheConfig::lru(100));
//! cache.insert("-6.2,106.8".to_string(), "Jakarta".to_string());
//! assert_eq!(cache.get(&"-6.2,106.8".to_string()), Some("Jakarta".to_string()));
//! ```
//!
//! ## Custom Configuration with Builder
//! ```
//! use std::time::Duration;
//!
//! use wastetrack_common::cache::{Cache, CacheConfig, EvictionPolicy};
//!
//! let config = CacheConfig::builder()
//!     .max_size(500)
//!     .ttl(Duration::from_secs(1800))
//!     .eviction_policy(EvictionPolicy::LFU)
//!     .track_metrics(true)
//!     .build();
//!
//! let cache: Cache<String, i32> = Cache::new(config);
//! ```
//!
//! # Eviction Policies
//!
//! - **LRU (Least Recently Used)**: Evicts entries that haven't been accessed
//!   recently
//! - **LFU (Least Frequently Used)**: Evicts entries with the lowest access
//!   count
//! - **FIFO (First In First Out)**: Evicts the oldest entries by insertion time
//! - **Random**: Evicts random entries
//! - **None**: Never evicts; inserts beyond capacity are dropped

mod config;
mod core;
mod stats;

// Re-export public API
pub use core::Cache;

pub use config::{CacheConfig, CacheConfigBuilder, EvictionPolicy};
pub use stats::CacheStats;
