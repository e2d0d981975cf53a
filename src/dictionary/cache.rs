//! Bounded LRU cache over dictionary loads.
//!
//! Wraps a [`DictionaryLoader`] so that repeated requests for the same
//! language return the same shared mapping without touching disk again.

use crate::dictionary::error::LoadError;
use crate::dictionary::loader::{DictionaryLoader, DiskLoader, WordMapping};
use crate::dictionary::metrics::{CacheCounters, CacheStats};
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::debug;

/// Default number of languages kept in the cache.
pub const DEFAULT_CACHE_MAX_SIZE: usize = 8;

/// Least-recently-used cache of word mappings, keyed by language code.
pub struct DictionaryCache<L = DiskLoader> {
    entries: LruCache<String, WordMapping>,
    loader: L,
    counters: CacheCounters,
}

impl<L: DictionaryLoader> DictionaryCache<L> {
    /// Create a cache holding at most `capacity` languages.
    pub fn new(capacity: NonZeroUsize, loader: L) -> Self {
        Self {
            entries: LruCache::new(capacity),
            loader,
            counters: CacheCounters::default(),
        }
    }

    /// Return the mapping for `code`, loading it on a miss.
    ///
    /// A hit counts as a fresh access. A failed load leaves the cache
    /// unchanged.
    pub fn get_or_load(&mut self, code: &str) -> Result<WordMapping, LoadError> {
        if let Some(mapping) = self.entries.get(code) {
            self.counters.record_hit();
            return Ok(mapping.clone());
        }

        self.counters.record_miss();
        debug!("Dictionary cache miss, loading '{}'", code);
        let mapping = self.loader.load(code)?;

        if let Some((evicted, _)) = self.entries.push(code.to_string(), mapping.clone()) {
            // push only returns a pair for a different key when the cache is full
            if evicted != code {
                self.counters.record_eviction();
                debug!("Evicted '{}' from dictionary cache", evicted);
            }
        }

        Ok(mapping)
    }

    /// Check whether `code` is cached without touching its recency.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.report(self.len(), self.capacity())
    }
}

impl<L> std::fmt::Debug for DictionaryCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Loader that records every code it is asked for.
    #[derive(Default)]
    struct RecordingLoader {
        calls: RefCell<Vec<String>>,
    }

    impl DictionaryLoader for &RecordingLoader {
        fn load(&self, code: &str) -> Result<WordMapping, LoadError> {
            self.calls.borrow_mut().push(code.to_string());
            if code == "broken" {
                return Err(LoadError::NotAMapping {
                    code: code.to_string(),
                    found: "array",
                });
            }
            let mut mapping = HashMap::new();
            mapping.insert(format!("{}-word", code), format!("{}-lemma", code));
            Ok(Arc::new(mapping))
        }
    }

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    // ==================== Hit/Miss Tests ====================

    #[test]
    fn test_second_lookup_is_a_hit() {
        let loader = RecordingLoader::default();
        let mut cache = DictionaryCache::new(cap(8), &loader);

        let first = cache.get_or_load("de").unwrap();
        let second = cache.get_or_load("de").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls.borrow().len(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let loader = RecordingLoader::default();
        let mut cache = DictionaryCache::new(cap(8), &loader);

        assert!(cache.get_or_load("broken").is_err());
        assert!(cache.get_or_load("broken").is_err());

        assert!(cache.is_empty());
        assert_eq!(loader.calls.borrow().len(), 2);
    }

    // ==================== Eviction Tests ====================

    #[test]
    fn test_lru_eviction() {
        let loader = RecordingLoader::default();
        let mut cache = DictionaryCache::new(cap(2), &loader);

        cache.get_or_load("a").unwrap();
        cache.get_or_load("b").unwrap();
        cache.get_or_load("c").unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.stats().evictions, 1);

        cache.get_or_load("a").unwrap();
        assert_eq!(loader.calls.borrow().as_slice(), ["a", "b", "c", "a"]);
    }

    #[test]
    fn test_hit_refreshes_recency() {
        let loader = RecordingLoader::default();
        let mut cache = DictionaryCache::new(cap(2), &loader);

        cache.get_or_load("a").unwrap();
        cache.get_or_load("b").unwrap();
        // Touch "a" so "b" becomes the oldest
        cache.get_or_load("a").unwrap();
        cache.get_or_load("c").unwrap();

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_evicted_mapping_outlives_cache_entry() {
        let loader = RecordingLoader::default();
        let mut cache = DictionaryCache::new(cap(1), &loader);

        let held = cache.get_or_load("a").unwrap();
        cache.get_or_load("b").unwrap();

        assert!(!cache.contains("a"));
        assert_eq!(held.get("a-word").map(String::as_str), Some("a-lemma"));
    }

    #[test]
    fn test_capacity_and_debug() {
        let loader = RecordingLoader::default();
        let cache = DictionaryCache::new(cap(DEFAULT_CACHE_MAX_SIZE), &loader);

        assert_eq!(cache.capacity(), 8);
        assert!(format!("{:?}", cache).contains("DictionaryCache"));
    }
}
