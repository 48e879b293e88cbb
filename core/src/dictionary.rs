// core/src/dictionary.rs
//
// Pronunciation-indexed dictionary store and its JSON file format.
//
// The store maps an exact pronunciation key (e.g. "ni hao") to the words
// spelled that way. Keys are kept in a BTreeMap so iteration, and therefore
// the saved file, is always in sorted key order.
//
// File shape:
//
//   {
//     "version": "1.0.0",
//     "created_at": "...",
//     "updated_at": "...",
//     "entries": {
//       "ni hao": [ { "word": "你好", "frequency": 1000, "pronunciation": "ni hao", "tags": [] } ]
//     }
//   }
//
// Unknown fields are ignored at both levels. Frequencies above u32::MAX are
// clamped; negative or fractional frequencies reject the whole document.
// A key repeated inside `entries` appends to the earlier list, and keys whose
// list ends up empty are not stored.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ImeError, Result};
use crate::utils;

const DEFAULT_VERSION: &str = "1.0.0";

/// One candidate word for one pronunciation key.
///
/// Entries are immutable once built; edit a dictionary by adding or removing
/// whole entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default, deserialize_with = "clamped_frequency")]
    pub frequency: u32,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DictEntry {
    pub fn new<W, P>(word: W, frequency: u32, pronunciation: P) -> Self
    where
        W: Into<String>,
        P: Into<String>,
    {
        Self {
            word: word.into(),
            frequency,
            pronunciation: pronunciation.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Dictionary store keyed by exact pronunciation.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: BTreeMap<String, Vec<DictEntry>>,
    version: String,
    created_at: String,
    updated_at: String,
}

impl Default for Dictionary {
    fn default() -> Self {
        let now = utils::timestamp();
        Self {
            entries: BTreeMap::new(),
            version: DEFAULT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// On-disk document as read. Everything but `entries` is informational.
#[derive(Deserialize)]
struct DictionaryDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default, deserialize_with = "merged_entries")]
    entries: BTreeMap<String, Vec<DictEntry>>,
}

/// Borrowed view used for saving, so the store is never cloned to write it.
#[derive(Serialize)]
struct DictionaryDocumentRef<'a> {
    version: &'a str,
    created_at: &'a str,
    updated_at: &'a str,
    entries: &'a BTreeMap<String, Vec<DictEntry>>,
}

impl Dictionary {
    /// Create an empty dictionary stamped with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor: load a fresh dictionary from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dict = Self::new();
        dict.load_from_file(path)?;
        Ok(dict)
    }

    /// Build a dictionary from `(pronunciation, word, frequency)` triples.
    ///
    /// Used for the small built-in entry sets the schemes fall back on.
    pub fn from_triples(triples: &[(&str, &str, u32)]) -> Self {
        let mut dict = Self::new();
        for (key, word, freq) in triples {
            dict.add_entry(key, DictEntry::new(*word, *freq, *key));
        }
        dict
    }

    /// Replace the contents of this dictionary with the document at `path`.
    ///
    /// Returns the number of entries loaded. On any failure (missing file,
    /// malformed text, zero entries) the dictionary is left untouched.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let count = self.load_from_str(&text)?;
        info!(path = %path.display(), keys = self.len(), entries = count, "loaded dictionary");
        Ok(count)
    }

    /// Same as [`load_from_file`](Self::load_from_file) for in-memory text.
    pub fn load_from_str(&mut self, text: &str) -> Result<usize> {
        let doc: DictionaryDocument = serde_json::from_str(text)?;

        let mut entries = doc.entries;
        entries.retain(|_, list| !list.is_empty());
        let mut count = 0usize;
        for (key, list) in entries.iter_mut() {
            for entry in list.iter_mut() {
                if entry.pronunciation.is_empty() {
                    entry.pronunciation = key.clone();
                }
            }
            count += list.len();
        }
        if count == 0 {
            return Err(ImeError::EmptyDictionary);
        }

        self.entries = entries;
        if let Some(version) = doc.version {
            self.version = version;
        }
        if let Some(created) = doc.created_at {
            self.created_at = created;
        }
        // updated_at always reflects the load, whatever the file said
        debug!(file_updated_at = ?doc.updated_at, "refreshing updated_at on load");
        self.updated_at = utils::timestamp();
        Ok(count)
    }

    /// Write the dictionary to `path` as pretty-printed JSON.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so a failed save leaves any previous file intact.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let doc = DictionaryDocumentRef {
            version: &self.version,
            created_at: &self.created_at,
            updated_at: &self.updated_at,
            entries: &self.entries,
        };
        let mut text = serde_json::to_string_pretty(&doc)?;
        text.push('\n');
        utils::write_atomic(path, text.as_bytes())?;
        info!(path = %path.display(), keys = self.len(), "saved dictionary");
        Ok(())
    }

    /// Exact-key lookup. Absent keys yield an empty slice.
    pub fn lookup(&self, pronunciation: &str) -> &[DictEntry] {
        self.entries
            .get(pronunciation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append `entry` under `pronunciation`. Duplicates are kept.
    pub fn add_entry(&mut self, pronunciation: &str, entry: DictEntry) {
        self.entries
            .entry(pronunciation.to_string())
            .or_default()
            .push(entry);
    }

    /// Remove every entry for `word` under `pronunciation`, returning how many
    /// were dropped. A key left with no entries is removed as well.
    pub fn remove_entries(&mut self, pronunciation: &str, word: &str) -> usize {
        let Some(list) = self.entries.get_mut(pronunciation) else {
            return 0;
        };
        let before = list.len();
        list.retain(|e| e.word != word);
        let removed = before - list.len();
        if list.is_empty() {
            self.entries.remove(pronunciation);
        }
        removed
    }

    /// Read-only view of the whole key → entries mapping, in sorted key order.
    pub fn entries(&self) -> &BTreeMap<String, Vec<DictEntry>> {
        &self.entries
    }

    pub fn contains_key(&self, pronunciation: &str) -> bool {
        self.entries.contains_key(pronunciation)
    }

    /// Number of pronunciation keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of entries across all keys.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version<S: Into<String>>(&mut self, version: S) {
        self.version = version.into();
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    /// Mark the dictionary as modified now.
    pub fn touch(&mut self) {
        self.updated_at = utils::timestamp();
    }
}

/// Read the `entries` object in document order, appending the lists of
/// repeated keys instead of letting the last one win.
fn merged_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<DictEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = BTreeMap<String, Vec<DictEntry>>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of pronunciation keys to entry arrays")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out: BTreeMap<String, Vec<DictEntry>> = BTreeMap::new();
            while let Some((key, list)) = map.next_entry::<String, Vec<DictEntry>>()? {
                out.entry(key).or_default().extend(list);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Accept any non-negative integral JSON number and clamp it into u32.
fn clamped_frequency<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct FrequencyVisitor;

    impl<'de> Visitor<'de> for FrequencyVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer frequency")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u32, E> {
            Ok(u32::try_from(v).unwrap_or(u32::MAX))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<u32, E> {
            if v < 0 {
                return Err(E::invalid_value(de::Unexpected::Signed(v), &self));
            }
            Ok(u32::try_from(v).unwrap_or(u32::MAX))
        }

        // integers too large for u64 arrive as floats
        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<u32, E> {
            if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
                return Err(E::invalid_value(de::Unexpected::Float(v), &self));
            }
            if v >= u32::MAX as f64 {
                Ok(u32::MAX)
            } else {
                Ok(v as u32)
            }
        }
    }

    deserializer.deserialize_any(FrequencyVisitor)
}
