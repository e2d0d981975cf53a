use crate::dictionary::DEFAULT_CACHE_MAX_SIZE;
use anyhow::{Context, Result};
use std::env::VarError;
use std::path::PathBuf;

/// Default archive directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    // Directory holding one `<code>.zst` archive per language
    pub data_dir: PathBuf,

    // Number of languages kept in the LRU cache
    pub cache_max_size: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl DictionaryConfig {
    /// Read `LEMMA_DATA_DIR` and `LEMMA_CACHE_MAX_SIZE`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            data_dir: match optional_var("LEMMA_DATA_DIR")? {
                Some(value) => PathBuf::from(value),
                None => defaults.data_dir,
            },

            cache_max_size: match optional_var("LEMMA_CACHE_MAX_SIZE")? {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("LEMMA_CACHE_MAX_SIZE is not a number: {}", value))?,
                None => defaults.cache_max_size,
            },
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_cache_max_size(mut self, cache_max_size: usize) -> Self {
        self.cache_max_size = cache_max_size;
        self
    }
}

/// Read an environment variable, treating only "not set" as absent.
fn optional_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", name)),
    }
}
