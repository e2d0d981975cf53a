//! Per-language dictionary loading and caching.
//!
//! # Architecture
//!
//! - `language`: Normalizes a requested language set into an ordered list of codes
//! - `registry`: Set of supported languages, scanned from the archive directory
//! - `loader`: Reads and decodes one language's archive from disk
//! - `cache`: Bounded LRU cache over loads
//! - `metrics`: Cache hit/miss/eviction counters
//! - `factory`: Tracks the active language set and rebuilds it through the cache
//!
//! # Example
//!
//! ```rust,ignore
//! use lemma_dictionaries::{DictionaryConfig, DictionaryFactory};
//!
//! let mut factory = DictionaryFactory::new(&DictionaryConfig::from_env()?)?;
//! let dictionaries = factory.get_dictionaries(["de", "en"])?;
//! let lemma = dictionaries["de"].get("Häuser");
//! ```

mod cache;
mod error;
mod factory;
mod language;
mod loader;
mod metrics;
mod registry;

pub use cache::{DictionaryCache, DEFAULT_CACHE_MAX_SIZE};
pub use error::{DictionaryError, LoadError};
pub use factory::{ActiveSet, DictionaryFactory};
pub use language::{validate_langs, LangSpec};
pub use loader::{DictionaryLoader, DiskLoader, WordMapping, ARCHIVE_EXTENSION};
pub use metrics::CacheStats;
pub use registry::SupportedLanguages;
