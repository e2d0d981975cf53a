//! Dictionary cache statistics.
//!
//! Counters are kept per cache rather than globally because each factory owns
//! its own cache.

use serde::Serialize;

/// Running counters for one dictionary cache.
#[derive(Debug, Default, Clone)]
pub(crate) struct CacheCounters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheCounters {
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// A miss always results in a disk load.
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn report(&self, entries: usize, capacity: usize) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate,
            entries,
            capacity,
        }
    }
}

/// Snapshot of a dictionary cache's statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,

    /// Lookups that went to disk
    pub misses: u64,

    /// Entries dropped to make room for new ones
    pub evictions: u64,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    /// Languages currently cached
    pub entries: usize,

    /// Maximum number of cached languages
    pub capacity: usize,
}
