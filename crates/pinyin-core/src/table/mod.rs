//! The emitted phrase table: pinyin key → ranked phrases.
//!
//! Keys keep the order chosen by the selector, both in memory and in the
//! JSON artifact (`{"nihao":["你好"],...}`, compact, non-ASCII literal).

pub mod lookup;
mod sink;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use lookup::{candidates, MatchKind};
pub use sink::{JsonFileSink, TableSink};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl PhraseTable {
    /// Build a table from ordered `(key, phrases)` pairs. Keys must be unique.
    pub fn from_entries(entries: Vec<(String, Vec<String>)>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, (key, _)) in entries.iter().enumerate() {
            if index.insert(key.clone(), i).is_some() {
                return Err(TableError::DuplicateKey(key.clone()));
            }
        }
        Ok(Self { entries, index })
    }

    /// Build from entries whose keys are already unique (selector output).
    pub(crate) fn from_unique_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        let index: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();
        debug_assert_eq!(index.len(), entries.len());
        Self { entries, index }
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, phrases)| (k.as_str(), phrases.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total phrases across all keys.
    pub fn phrase_count(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.len()).sum()
    }

    /// Candidates for a typed pinyin buffer, best first. See [`lookup`].
    pub fn candidates(&self, buffer: &str) -> Vec<&str> {
        lookup::candidates(self, buffer, None)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a table written by [`JsonFileSink`].
    pub fn open(path: &Path) -> Result<Self, TableError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Serialize for PhraseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, phrases) in &self.entries {
            map.serialize_entry(key, phrases)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = PhraseTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of pinyin key to phrase list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, Vec<String>)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, phrases)) = access.next_entry::<String, Vec<String>>()? {
            entries.push((key, phrases));
        }
        PhraseTable::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for PhraseTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}
