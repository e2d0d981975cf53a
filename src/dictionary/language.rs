//! Language-set specification and validation.
//!
//! Callers may ask for a single language or an ordered list of languages.
//! Both shapes are collapsed into one canonical ordered list of codes before
//! anything else looks at them.

use crate::dictionary::error::{json_type_name, DictionaryError};
use serde_json::Value;

/// A requested set of languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangSpec {
    /// One language code (e.g. `"de"`).
    Single(String),

    /// An ordered sequence of language codes.
    Many(Vec<String>),
}

impl From<&str> for LangSpec {
    fn from(code: &str) -> Self {
        LangSpec::Single(code.to_string())
    }
}

impl From<String> for LangSpec {
    fn from(code: String) -> Self {
        LangSpec::Single(code)
    }
}

impl From<Vec<String>> for LangSpec {
    fn from(codes: Vec<String>) -> Self {
        LangSpec::Many(codes)
    }
}

impl From<Vec<&str>> for LangSpec {
    fn from(codes: Vec<&str>) -> Self {
        LangSpec::Many(codes.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LangSpec {
    fn from(codes: &[&str]) -> Self {
        LangSpec::Many(codes.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LangSpec {
    fn from(codes: [&str; N]) -> Self {
        LangSpec::Many(codes.iter().map(|c| c.to_string()).collect())
    }
}

impl TryFrom<&Value> for LangSpec {
    type Error = DictionaryError;

    /// Interpret untyped input (e.g. from a config file).
    ///
    /// Only a string or an array of strings is accepted. `null` is rejected
    /// like any other type, so an unset language argument fails fast.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(code) => Ok(LangSpec::Single(code.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(code) => Ok(code.clone()),
                    other => Err(DictionaryError::InvalidArgument(format!(
                        "language list must contain only codes, found {}",
                        json_type_name(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(LangSpec::Many),
            other => Err(DictionaryError::InvalidArgument(format!(
                "lang argument must be a language code or a list of codes, found {}",
                json_type_name(other)
            ))),
        }
    }
}

/// Collapse a language specification into an ordered list of codes.
///
/// Request order and duplicates are preserved.
pub fn validate_langs(spec: impl Into<LangSpec>) -> Vec<String> {
    match spec.into() {
        LangSpec::Single(code) => vec![code],
        LangSpec::Many(codes) => codes,
    }
}
