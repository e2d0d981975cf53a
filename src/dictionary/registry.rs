//! Supported-language registry: the set of codes that have an archive on disk.
//!
//! The registry is computed once, when a factory is built, by scanning the
//! archive directory. It is owned by that factory and never changes afterwards.

use crate::dictionary::error::DictionaryError;
use crate::dictionary::loader::ARCHIVE_EXTENSION;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Immutable set of language codes with an archive file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedLanguages {
    codes: BTreeSet<String>,
}

impl SupportedLanguages {
    /// Scan `dir` for archive files.
    ///
    /// Only regular files named `<code>.<ARCHIVE_EXTENSION>` count. Anything
    /// else in the directory (subdirectories, other extensions) is ignored.
    ///
    /// # Errors
    /// Returns `DictionaryError::Scan` if the directory cannot be read.
    pub fn scan(dir: &Path) -> Result<Self, DictionaryError> {
        let scan_err = |source| DictionaryError::Scan {
            path: dir.to_path_buf(),
            source,
        };

        let mut codes = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(ARCHIVE_EXTENSION) {
                continue;
            }
            if let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) {
                codes.insert(code.to_string());
            }
        }

        Ok(Self { codes })
    }

    /// Check if a language code has an archive.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Iterate over the supported codes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SupportedLanguages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
