//! Bounded FIFO response cache

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{CacheMetrics, CacheStats};

/// Capacity of the cache kept in front of the ToneShift server
pub const CLIENT_CAPACITY: usize = 50;

/// Capacity of the cache kept in front of the upstream model
pub const SERVER_CAPACITY: usize = 100;

/// Cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries before the oldest is evicted
    pub capacity: usize,
}

impl CacheConfig {
    /// Client tier defaults
    pub fn client() -> Self {
        Self {
            capacity: CLIENT_CAPACITY,
        }
    }

    /// Server tier defaults
    pub fn server() -> Self {
        Self {
            capacity: SERVER_CAPACITY,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::server()
    }
}

struct Entries<V> {
    values: HashMap<String, V>,
    order: VecDeque<String>,
}

/// Key/value cache evicting in insertion order
///
/// Reads never refresh an entry's position; once `capacity` is exceeded the
/// oldest inserted key goes, however often it was read.
pub struct ResponseCache<V = String> {
    entries: Mutex<Entries<V>>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl<V: Clone> ResponseCache<V> {
    /// Create a cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(Entries {
                values: HashMap::new(),
                order: VecDeque::new(),
            }),
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Create a cache holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig { capacity })
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.entries.lock().values.get(key).cloned();
        match value {
            Some(_) => self.metrics.record_hit(),
            None => self.metrics.record_miss(),
        }
        value
    }

    /// Store a value, evicting the oldest entry when over capacity
    ///
    /// Replacing an existing key keeps its original insertion position.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let mut entries = self.entries.lock();

        if let Some(existing) = entries.values.get_mut(&key) {
            *existing = value;
            return;
        }

        entries.order.push_back(key.clone());
        entries.values.insert(key, value);
        self.metrics.record_insertion();

        while entries.values.len() > self.config.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.values.remove(&oldest);
            self.metrics.record_eviction();
            debug!(key = %oldest, "Evicted oldest cache entry");
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.values.clear();
        entries.order.clear();
        debug!("Cleared response cache");
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().values.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Current statistics
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len())
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
