pub mod config;
pub mod dictionary;

pub use config::DictionaryConfig;
pub use dictionary::{
    validate_langs, ActiveSet, CacheStats, DictionaryCache, DictionaryError, DictionaryFactory,
    DictionaryLoader, DiskLoader, LangSpec, LoadError, SupportedLanguages, WordMapping,
};
