// libpinyin/src/parser.rs
//
// Pinyin parser: exact dictionary lookup with a single-split segmentation
// fallback, cached per input string.
//
// Pipeline for `parse_continuous`:
//   1. return the cached result for the exact input, if any
//   2. exact lookup of the whole input
//   3. on a miss (and input longer than one char), try every split point
//      and combine left/right entries pairwise
//   4. stable sort by frequency, highest first
//   5. keep the first occurrence of each word
//   6. truncate to MAX_CANDIDATES and cache
//
// Segmentation splits exactly once. Input that needs three or more
// dictionary words ("woaini" with only "wo", "ai", "ni") yields nothing.
//
// The cache is never invalidated implicitly. The dictionary sits behind an
// `Arc` and cannot change under the parser, so `clear_cache` is only needed
// when a caller wants fresh statistics or swaps dictionaries.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use hanzi_core::{DictEntry, Dictionary};
use serde::Serialize;
use tracing::debug;

/// Upper bound on candidates returned by `parse_continuous`.
pub const MAX_CANDIDATES: usize = 20;

/// Tag attached to entries built by segmentation.
pub const COMBINED_TAG: &str = "combined";

/// Parallel word / frequency / tag lists, index-aligned.
///
/// Tags come from the dictionary for exact matches and are `["combined"]`
/// for segmented ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub candidates: Vec<String>,
    pub frequencies: Vec<u32>,
    pub tags: Vec<Vec<String>>,
}

impl ParseResult {
    fn from_entries(entries: &[DictEntry]) -> Self {
        Self {
            candidates: entries.iter().map(|e| e.word.clone()).collect(),
            frequencies: entries.iter().map(|e| e.frequency).collect(),
            tags: entries.iter().map(|e| e.tags.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate `(word, frequency)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.candidates
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }

    /// Iterate `(word, frequency, tags)` triples.
    pub fn iter_tagged(&self) -> impl Iterator<Item = (&str, u32, &[String])> {
        self.iter()
            .zip(self.tags.iter().map(Vec::as_slice))
            .map(|((word, freq), tags)| (word, freq, tags))
    }
}

pub struct PinyinParser {
    dict: Arc<Dictionary>,
    cache: RefCell<AHashMap<String, ParseResult>>,
    cache_hits: Cell<usize>,
    cache_misses: Cell<usize>,
}

impl PinyinParser {
    pub fn new(dict: Arc<Dictionary>) -> Self {
        Self {
            dict,
            cache: RefCell::new(AHashMap::new()),
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        }
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dict
    }

    /// Entries for one exact key, highest frequency first (stable).
    pub fn parse_single(&self, syllable: &str) -> Vec<DictEntry> {
        let mut out = self.dict.lookup(syllable).to_vec();
        sort_entries(&mut out);
        out
    }

    /// Ranked, deduplicated candidates for a whole input sequence.
    ///
    /// The cache key is the raw input; callers that want "Ni Hao" and "ni hao"
    /// to share a slot must normalize first.
    pub fn parse_continuous(&self, sequence: &str) -> ParseResult {
        if let Some(hit) = self.cache.borrow().get(sequence) {
            self.cache_hits.set(self.cache_hits.get() + 1);
            return hit.clone();
        }
        self.cache_misses.set(self.cache_misses.get() + 1);

        let mut entries = self.dict.lookup(sequence).to_vec();
        if entries.is_empty() && sequence.chars().count() > 1 {
            entries = self.segment(sequence);
        }

        sort_entries(&mut entries);
        let mut seen = AHashSet::new();
        entries.retain(|e| seen.insert(e.word.clone()));
        entries.truncate(MAX_CANDIDATES);

        let result = ParseResult::from_entries(&entries);
        self.cache
            .borrow_mut()
            .insert(sequence.to_string(), result.clone());
        result
    }

    /// Combine entries across every single split point of `sequence`.
    ///
    /// Splits fall on char boundaries only, so non-ASCII input is safe.
    fn segment(&self, sequence: &str) -> Vec<DictEntry> {
        let mut combined = Vec::new();
        for (i, _) in sequence.char_indices().skip(1) {
            let (left, right) = sequence.split_at(i);
            let lhs = self.dict.lookup(left);
            if lhs.is_empty() {
                continue;
            }
            let rhs = self.dict.lookup(right);
            if rhs.is_empty() {
                continue;
            }
            debug!(left, right, pairs = lhs.len() * rhs.len(), "segmentation split");
            for l in lhs {
                for r in rhs {
                    combined.push(DictEntry {
                        word: format!("{}{}", l.word, r.word),
                        frequency: l.frequency.min(r.frequency),
                        pronunciation: format!("{} {}", l.pronunciation, r.pronunciation),
                        tags: vec![COMBINED_TAG.to_string()],
                    });
                }
            }
        }
        combined
    }

    /// Cache statistics as `(hits, misses)`.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits.get(), self.cache_misses.get())
    }

    /// Hit rate as a percentage, or None before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some(hits as f32 / total as f32 * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Drop every cached result and reset the statistics.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        self.cache_hits.set(0);
        self.cache_misses.set(0);
    }
}

fn sort_entries(entries: &mut [DictEntry]) {
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
}
