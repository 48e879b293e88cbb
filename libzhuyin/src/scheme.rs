// libzhuyin/src/scheme.rs
//
// Bopomofo-backed implementation of `InputScheme`.
//
// The dictionary is loaded on first use through the injected locator; when
// no file resolves the built-in entries are used instead. Lookup tries the
// normalized input (NFC, trimmed, whitespace collapsed) as an exact key, then
// falls back to the key whose whitespace-stripped form equals the stripped
// input. That second step goes through an index built once per load; when
// several keys strip to the same string the first in sorted order wins.

use std::sync::Arc;

use ahash::AHashMap;
use hanzi_core::{
    load_first, sort_by_frequency, utils, Candidate, Charset, DictEntry, Dictionary,
    DictionaryLocator, InputScheme, SchemeKind, UserWords,
};
use tracing::{debug, warn};

use crate::fallback_dictionary;
use crate::mapper::BopomofoMapper;

/// Upper bound on candidates per query.
pub const MAX_CANDIDATES: usize = 10;

pub const DEFAULT_DICTIONARY: &str = "bopomofo.dict.json";

struct LoadedDictionary {
    dict: Arc<Dictionary>,
    by_stripped_key: AHashMap<String, String>,
}

impl LoadedDictionary {
    fn new(dict: Arc<Dictionary>) -> Self {
        let mut by_stripped_key = AHashMap::with_capacity(dict.len());
        for key in dict.entries().keys() {
            by_stripped_key
                .entry(utils::strip_whitespace(key))
                .or_insert_with(|| key.clone());
        }
        Self {
            dict,
            by_stripped_key,
        }
    }

    fn find(&self, input: &str) -> &[DictEntry] {
        let exact = self.dict.lookup(&utils::normalize_spacing(input));
        if !exact.is_empty() {
            return exact;
        }
        let stripped = utils::strip_whitespace(input);
        match self.by_stripped_key.get(&stripped) {
            Some(key) => {
                debug!(input, key = key.as_str(), "matched on stripped key");
                self.dict.lookup(key)
            }
            None => &[],
        }
    }
}

pub struct BopomofoScheme {
    mapper: BopomofoMapper,
    locator: Box<dyn DictionaryLocator>,
    file_name: String,
    loaded: Option<LoadedDictionary>,
    user_words: UserWords,
}

impl BopomofoScheme {
    /// A scheme that resolves `bopomofo.dict.json` through `locator` on first
    /// use.
    pub fn new(locator: Box<dyn DictionaryLocator>) -> Self {
        Self::with_file_name(locator, DEFAULT_DICTIONARY)
    }

    pub fn with_file_name(locator: Box<dyn DictionaryLocator>, file_name: &str) -> Self {
        Self {
            mapper: BopomofoMapper::new(),
            locator,
            file_name: file_name.to_string(),
            loaded: None,
            user_words: UserWords::new(),
        }
    }

    /// A scheme over an already-loaded dictionary. No file is ever read.
    pub fn with_dictionary(dict: Arc<Dictionary>) -> Self {
        let mut scheme = Self::new(Box::new(hanzi_core::FixedPaths::none()));
        scheme.loaded = Some(LoadedDictionary::new(dict));
        scheme
    }

    pub fn mapper(&self) -> &BopomofoMapper {
        &self.mapper
    }

    /// Pinyin spelling of a bopomofo sequence.
    pub fn convert_to_pinyin(&self, input: &str) -> String {
        self.mapper.to_pinyin(input)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The dictionary in use, loading it if needed.
    pub fn dictionary(&mut self) -> Arc<Dictionary> {
        Arc::clone(&self.ensure_loaded().dict)
    }

    fn ensure_loaded(&mut self) -> &LoadedDictionary {
        let locator = self.locator.as_ref();
        let file_name = self.file_name.as_str();
        self.loaded.get_or_insert_with(|| {
            let dict = match load_first(locator, file_name) {
                Some((_, dict)) => dict,
                None => {
                    warn!(file = file_name, "no bopomofo dictionary found, using built-in entries");
                    fallback_dictionary()
                }
            };
            LoadedDictionary::new(Arc::new(dict))
        })
    }
}

impl InputScheme for BopomofoScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Bopomofo
    }

    fn charset(&self) -> Charset {
        Charset::Traditional
    }

    fn candidates(&mut self, input: &str) -> Vec<Candidate> {
        if !self.mapper.is_valid(input) {
            return Vec::new();
        }
        let entries = self.ensure_loaded().find(input).to_vec();
        let mut out: Vec<Candidate> = entries
            .iter()
            .map(|e| {
                let mut c = Candidate::from(e);
                c.frequency = c.frequency.saturating_add(self.user_words.boost(&e.word));
                c
            })
            .collect();
        sort_by_frequency(&mut out);
        out.truncate(MAX_CANDIDATES);
        out
    }

    fn add_word(&mut self, word: &str, frequency: i64) {
        self.user_words.set(word, frequency);
    }

    fn remove_word(&mut self, word: &str) -> bool {
        self.user_words.remove(word)
    }
}
