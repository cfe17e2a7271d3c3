//! Core cache implementation with configurable eviction policies

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rand::seq::IteratorRandom;

use super::config::{CacheConfig, EvictionPolicy};
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

/// Entry stored in the cache with metadata for eviction policies
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    access_count: u64,
}

/// Internal storage for cache entries
#[derive(Debug)]
struct CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    entries: HashMap<K, CacheEntry<V>>,
    /// Front is the next LRU/FIFO eviction candidate
    order: VecDeque<K>,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new() }
    }

    fn move_to_back(&mut self, key: &K) {
        if let Some(position) = self.order.iter().position(|k| k == key) {
            if let Some(existing) = self.order.remove(position) {
                self.order.push_back(existing);
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        self.order.retain(|k| k != key);
        self.entries.remove(key)
    }
}

/// Generic thread-safe cache with configurable eviction policies
///
/// Clones share storage and counters.
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock type for TTL checks (defaults to `SystemClock`)
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration using system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Insert a value into the cache
    ///
    /// When the cache is full and `key` is new, one entry is evicted first
    /// according to the configured policy. With [`EvictionPolicy::None`] a
    /// full cache rejects new keys. Returns whether the value was stored.
    pub fn insert(&self, key: K, value: V) -> bool {
        let mut storage = self.storage.write();

        if let Some(max_size) = self.config.max_size {
            if !storage.entries.contains_key(&key) && storage.entries.len() >= max_size {
                if max_size == 0 || !self.evict_one(&mut storage) {
                    return false;
                }
            }
        }

        let entry = CacheEntry { value, inserted_at: self.clock.now(), access_count: 0 };
        if storage.entries.insert(key.clone(), entry).is_some() {
            storage.move_to_back(&key);
        } else {
            storage.order.push_back(key);
        }

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
        true
    }

    /// Get a value from the cache
    ///
    /// Returns `None` if the key doesn't exist or if the entry has expired.
    /// Updates access metadata used by the LRU and LFU policies.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write();

        let expired = match (storage.entries.get(key), self.config.ttl) {
            (None, _) => {
                self.record_miss();
                return None;
            }
            (Some(entry), Some(ttl)) => self.clock.now().duration_since(entry.inserted_at) >= ttl,
            (Some(_), None) => false,
        };

        if expired {
            storage.remove(key);
            self.record_miss();
            if self.config.track_metrics {
                self.metrics.record_expiration();
            }
            return None;
        }

        let value = storage.entries.get_mut(key).map(|entry| {
            entry.access_count += 1;
            entry.value.clone()
        });

        if self.config.eviction_policy == EvictionPolicy::LRU {
            storage.move_to_back(key);
        }

        if self.config.track_metrics {
            self.metrics.record_hit();
        }
        value
    }

    /// Whether a live (non-expired) entry exists, without touching access
    /// metadata
    pub fn contains_key(&self, key: &K) -> bool {
        let storage = self.storage.read();
        match (storage.entries.get(key), self.config.ttl) {
            (None, _) => false,
            (Some(entry), Some(ttl)) => self.clock.now().duration_since(entry.inserted_at) < ttl,
            (Some(_), None) => true,
        }
    }

    /// Get or insert with a generator function
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = f();
        self.insert(key, value.clone());
        value
    }

    /// Remove a value from the cache
    pub fn remove(&self, key: &K) -> Option<V> {
        self.storage.write().remove(key).map(|e| e.value)
    }

    /// Clear all entries and reset counters
    pub fn clear(&self) {
        let mut storage = self.storage.write();
        storage.entries.clear();
        storage.order.clear();

        if self.config.track_metrics {
            self.metrics.reset();
        }
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.storage.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity (None = unbounded)
    pub fn capacity(&self) -> Option<usize> {
        self.config.max_size
    }

    /// Remove expired entries
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let Some(ttl) = self.config.ttl else {
            return 0;
        };

        let now = self.clock.now();
        let mut storage = self.storage.write();

        let expired: Vec<K> = storage
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.inserted_at) >= ttl)
            .map(|(k, _)| k.clone())
            .collect();

        for key in &expired {
            storage.remove(key);
            if self.config.track_metrics {
                self.metrics.record_expiration();
            }
        }

        expired.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_size)
    }

    fn record_miss(&self) {
        if self.config.track_metrics {
            self.metrics.record_miss();
        }
    }

    /// Evict one entry based on the configured policy. Returns whether an
    /// entry was removed.
    fn evict_one(&self, storage: &mut CacheStorage<K, V>) -> bool {
        let victim = match self.config.eviction_policy {
            EvictionPolicy::LRU | EvictionPolicy::FIFO => storage.order.front().cloned(),
            EvictionPolicy::LFU => storage
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.access_count)
                .map(|(k, _)| k.clone()),
            EvictionPolicy::Random => {
                let mut rng = rand::thread_rng();
                storage.entries.keys().choose(&mut rng).cloned()
            }
            EvictionPolicy::None => None,
        };

        let Some(key) = victim else {
            return false;
        };

        storage.remove(&key);
        if self.config.track_metrics {
            self.metrics.record_eviction();
        }
        true
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<K, V, C> std::fmt::Debug for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.storage.read().entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
