//! Dictionary factory: hands out the currently requested set of dictionaries.
//!
//! The factory remembers the last resolved language set (the *active set*).
//! A repeated request for the same languages, in any order, returns it as-is
//! without touching the cache. A different request rebuilds the active set
//! through the LRU cache, so switching between a few configurations doesn't
//! reload archives from disk.

use crate::config::DictionaryConfig;
use crate::dictionary::cache::DictionaryCache;
use crate::dictionary::error::DictionaryError;
use crate::dictionary::language::{validate_langs, LangSpec};
use crate::dictionary::loader::{DictionaryLoader, DiskLoader, WordMapping};
use crate::dictionary::metrics::CacheStats;
use crate::dictionary::registry::SupportedLanguages;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::{debug, error, info};

/// Mapping from language code to its word mapping.
///
/// Iteration order is unspecified and does not follow the request order;
/// look dictionaries up by code.
pub type ActiveSet = HashMap<String, WordMapping>;

/// Loads, caches and tracks per-language dictionaries.
///
/// Not meant to be shared between threads without external locking; use one
/// factory per worker instead.
pub struct DictionaryFactory<L = DiskLoader> {
    supported: SupportedLanguages,
    cache: DictionaryCache<L>,
    active: ActiveSet,
}

impl DictionaryFactory<DiskLoader> {
    /// Build a factory over the archive directory in `config`.
    ///
    /// Scans the directory once to find the supported languages.
    ///
    /// # Errors
    /// * `InvalidArgument` if `cache_max_size` is zero
    /// * `Scan` if the archive directory cannot be read
    pub fn new(config: &DictionaryConfig) -> Result<Self, DictionaryError> {
        let supported = SupportedLanguages::scan(&config.data_dir)?;
        info!(
            "Found {} dictionaries in {} (cache size {})",
            supported.len(),
            config.data_dir.display(),
            config.cache_max_size
        );
        Self::with_loader(
            supported,
            config.cache_max_size,
            DiskLoader::new(config.data_dir.clone()),
        )
    }
}

impl<L: DictionaryLoader> DictionaryFactory<L> {
    /// Build a factory from an explicit registry and loader.
    pub fn with_loader(
        supported: SupportedLanguages,
        cache_max_size: usize,
        loader: L,
    ) -> Result<Self, DictionaryError> {
        let capacity = NonZeroUsize::new(cache_max_size).ok_or_else(|| {
            DictionaryError::InvalidArgument("cache_max_size must be positive".to_string())
        })?;

        Ok(Self {
            supported,
            cache: DictionaryCache::new(capacity, loader),
            active: ActiveSet::new(),
        })
    }

    /// Return the dictionaries for `langs`.
    ///
    /// Unsupported codes are logged and left out of the result, so the keys
    /// of the returned map are what was actually resolved.
    ///
    /// # Errors
    /// Returns `DictionaryError::Load` if a supported language's archive
    /// cannot be read. The previous active set is kept in that case.
    pub fn get_dictionaries(
        &mut self,
        langs: impl Into<LangSpec>,
    ) -> Result<&ActiveSet, DictionaryError> {
        let langs = validate_langs(langs);

        let mut requested: Vec<&str> = langs.iter().map(String::as_str).collect();
        requested.sort_unstable();
        if requested == self.active_languages() {
            debug!("Requested languages already active: {:?}", requested);
            return Ok(&self.active);
        }

        let mut rebuilt = ActiveSet::with_capacity(langs.len());
        for lang in langs {
            if !self.supported.contains(&lang) {
                error!("language not supported: {}", lang);
                continue;
            }
            debug!("loading {}", lang);
            let mapping = self.cache.get_or_load(&lang)?;
            rebuilt.insert(lang, mapping);
        }

        self.active = rebuilt;
        Ok(&self.active)
    }

    /// Same as [`get_dictionaries`](Self::get_dictionaries) for untyped input.
    ///
    /// # Errors
    /// Returns `DictionaryError::InvalidArgument` unless `langs` is a string
    /// or an array of strings.
    pub fn get_dictionaries_value(&mut self, langs: &Value) -> Result<&ActiveSet, DictionaryError> {
        let spec = LangSpec::try_from(langs)?;
        self.get_dictionaries(spec)
    }

    /// Codes in the active set, sorted.
    pub fn active_languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.active.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn supported_languages(&self) -> &SupportedLanguages {
        &self.supported
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.contains(code)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl<L: DictionaryLoader> std::fmt::Debug for DictionaryFactory<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryFactory")
            .field("supported", &self.supported)
            .field("cache", &self.cache)
            .field("active", &self.active_languages())
            .finish()
    }
}
