//! Error types for dictionary loading and retrieval.

use std::path::PathBuf;

/// Failure to load one language's archive from disk.
///
/// A language that is listed in the registry but cannot be loaded points at a
/// packaging problem, so these errors are never swallowed by the cache or the
/// factory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open dictionary archive for '{code}' at {}: {source}", .path.display())]
    Open {
        code: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary archive for '{code}' is corrupt: {source}")]
    Decompress {
        code: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary payload for '{code}' could not be deserialized: {source}")]
    Deserialize {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary payload for '{code}' is not a mapping (found {found})")]
    NotAMapping { code: String, found: &'static str },

    #[error("dictionary entry '{word}' for '{code}' has a non-string lemma ({found})")]
    InvalidEntry {
        code: String,
        word: String,
        found: &'static str,
    },
}

impl LoadError {
    /// The language code whose archive failed to load.
    pub fn code(&self) -> &str {
        match self {
            LoadError::Open { code, .. }
            | LoadError::Decompress { code, .. }
            | LoadError::Deserialize { code, .. }
            | LoadError::NotAMapping { code, .. }
            | LoadError::InvalidEntry { code, .. } => code,
        }
    }
}

/// Errors returned by the dictionary factory.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The language argument is malformed (wrong shape or type).
    #[error("invalid language argument: {0}")]
    InvalidArgument(String),

    /// A supported language failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The archive directory could not be scanned.
    #[error("cannot scan dictionary directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
