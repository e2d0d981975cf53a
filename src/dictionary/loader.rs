//! Reading per-language archives from disk.
//!
//! An archive is a zstd frame whose payload is a JSON object mapping each
//! word form to its lemma. Archives live in one directory, one file per
//! language, named `<code>.zst`.

use crate::dictionary::error::{json_type_name, LoadError};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File extension shared by every dictionary archive.
pub const ARCHIVE_EXTENSION: &str = "zst";

/// Immutable word-form → lemma table for one language.
///
/// Shared by reference between the cache and the active set.
pub type WordMapping = Arc<HashMap<String, String>>;

/// Source of word mappings, keyed by language code.
pub trait DictionaryLoader {
    fn load(&self, code: &str) -> Result<WordMapping, LoadError>;
}

/// Loads archives from a fixed directory.
#[derive(Debug, Clone)]
pub struct DiskLoader {
    data_dir: PathBuf,
}

impl DiskLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the archive for `code`.
    pub fn archive_path(&self, code: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", code, ARCHIVE_EXTENSION))
    }
}

impl DictionaryLoader for DiskLoader {
    fn load(&self, code: &str) -> Result<WordMapping, LoadError> {
        let path = self.archive_path(code);
        let file = File::open(&path).map_err(|source| LoadError::Open {
            code: code.to_string(),
            path: path.clone(),
            source,
        })?;

        let decoder = zstd::Decoder::new(file).map_err(|source| LoadError::Decompress {
            code: code.to_string(),
            source,
        })?;

        let mut rejection = None;
        let mut deserializer = serde_json::Deserializer::from_reader(decoder);
        let parsed = WordTableSeed {
            rejection: &mut rejection,
        }
        .deserialize(&mut deserializer)
        .and_then(|mapping| deserializer.end().map(|()| mapping));

        let mapping = parsed.map_err(|source| match rejection.take() {
            Some(Rejection::NotAMapping { found }) => LoadError::NotAMapping {
                code: code.to_string(),
                found,
            },
            Some(Rejection::InvalidEntry { word, found }) => LoadError::InvalidEntry {
                code: code.to_string(),
                word,
                found,
            },
            // Read failures surface through the JSON reader
            None if source.is_io() => LoadError::Decompress {
                code: code.to_string(),
                source: source.into(),
            },
            None => LoadError::Deserialize {
                code: code.to_string(),
                source,
            },
        })?;

        debug!(
            "Loaded {} entries for '{}' from {}",
            mapping.len(),
            code,
            path.display()
        );
        Ok(Arc::new(mapping))
    }
}

/// Why a well-formed JSON payload is not a word mapping.
enum Rejection {
    NotAMapping { found: &'static str },
    InvalidEntry { word: String, found: &'static str },
}

/// Deserializes a payload straight into a word → lemma table.
///
/// Shape errors are recorded in `rejection` so the caller can report them
/// with their own `LoadError` variant.
struct WordTableSeed<'a> {
    rejection: &'a mut Option<Rejection>,
}

impl<'de, 'a> DeserializeSeed<'de> for WordTableSeed<'a> {
    type Value = HashMap<String, String>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(WordTableVisitor {
            rejection: self.rejection,
        })
    }
}

struct WordTableVisitor<'a> {
    rejection: &'a mut Option<Rejection>,
}

impl<'a> WordTableVisitor<'a> {
    fn not_a_mapping<E: de::Error>(self, found: &'static str) -> Result<HashMap<String, String>, E> {
        *self.rejection = Some(Rejection::NotAMapping { found });
        Err(E::custom(format!("expected a mapping, found {}", found)))
    }
}

impl<'de, 'a> Visitor<'de> for WordTableVisitor<'a> {
    type Value = HashMap<String, String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping of word forms to lemmas")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut table = HashMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(word) = map.next_key::<String>()? {
            match map.next_value::<Value>()? {
                Value::String(lemma) => {
                    table.insert(word, lemma);
                }
                other => {
                    let found = json_type_name(&other);
                    let message = format!("lemma for '{}' is a {}", word, found);
                    *self.rejection = Some(Rejection::InvalidEntry { word, found });
                    return Err(de::Error::custom(message));
                }
            }
        }
        Ok(table)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> Result<Self::Value, A::Error> {
        self.not_a_mapping("array")
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
        self.not_a_mapping("string")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        self.not_a_mapping("boolean")
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        self.not_a_mapping("number")
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        self.not_a_mapping("number")
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        self.not_a_mapping("number")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        self.not_a_mapping("null")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_archive(dir: &Path, code: &str, payload: &[u8]) {
        let compressed = zstd::encode_all(payload, 3).expect("Failed to compress");
        std::fs::write(dir.join(format!("{}.zst", code)), compressed)
            .expect("Failed to write archive");
    }

    // ==================== Success Tests ====================

    #[test]
    fn test_load_valid_archive() {
        let dir = TempDir::new().unwrap();
        let payload = json!({"Häuser": "Haus", "ging": "gehen"}).to_string();
        write_archive(dir.path(), "de", payload.as_bytes());

        let mapping = DiskLoader::new(dir.path()).load("de").expect("Should load");

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("ging").map(String::as_str), Some("gehen"));
    }

    #[test]
    fn test_load_empty_mapping() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "la", b"{}");

        let mapping = DiskLoader::new(dir.path()).load("la").unwrap();

        assert!(mapping.is_empty());
    }

    #[test]
    fn test_archive_path() {
        let loader = DiskLoader::new("/srv/dicts");
        assert_eq!(loader.archive_path("fi"), PathBuf::from("/srv/dicts/fi.zst"));
        assert_eq!(loader.data_dir(), Path::new("/srv/dicts"));
    }

    // ==================== Failure Tests ====================

    #[test]
    fn test_missing_archive() {
        let dir = TempDir::new().unwrap();
        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(err.code(), "de");
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("de.zst"), b"definitely not zstd").unwrap();

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(err, LoadError::Decompress { .. }));
    }

    #[test]
    fn test_payload_not_json() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "de", b"\x80\x03}q\x00.");

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(err, LoadError::Deserialize { .. }));
    }

    #[test]
    fn test_payload_not_a_mapping() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "de", br#"["Haus", "gehen"]"#);

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(
            err,
            LoadError::NotAMapping { found: "array", .. }
        ));
    }

    #[test]
    fn test_payload_scalar_root() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "de", b"null");

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(err, LoadError::NotAMapping { found: "null", .. }));
    }

    #[test]
    fn test_trailing_data_after_mapping() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "de", br#"{"ging": "gehen"} []"#);

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(err, LoadError::Deserialize { .. }));
    }

    #[test]
    fn test_truncated_archive() {
        let dir = TempDir::new().unwrap();
        let payload = json!({"Häuser": "Haus", "ging": "gehen"}).to_string();
        let compressed = zstd::encode_all(payload.as_bytes(), 3).unwrap();
        std::fs::write(dir.path().join("de.zst"), &compressed[..compressed.len() / 2]).unwrap();

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        assert!(matches!(
            err,
            LoadError::Decompress { .. } | LoadError::Deserialize { .. }
        ));
    }

    #[test]
    fn test_payload_with_non_string_lemma() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), "de", br#"{"ging": 3}"#);

        let err = DiskLoader::new(dir.path()).load("de").unwrap_err();

        match err {
            LoadError::InvalidEntry { word, found, .. } => {
                assert_eq!(word, "ging");
                assert_eq!(found, "number");
            }
            other => panic!("Unexpected error: {other}"),
        }
    }
}
