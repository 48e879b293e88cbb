//! Per-user word boosts and learned selection preferences.
//!
//! - `UserWords`: manual word → boost table owned by each scheme. `set`
//!   replaces the previous boost rather than adding to it.
//! - `PreferenceTable`: input key → (candidate → weight), learned from
//!   explicit selections. Weights only ever accumulate; nothing decays.
//!
//! Both live in memory. `PreferenceTable` can be saved and loaded as JSON on
//! a best-effort basis; schemes never persist on their own.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::candidate::{sort_by_frequency, Candidate};
use crate::error::Result;
use crate::utils;

/// Manual word boosts for one scheme.
#[derive(Debug, Clone, Default)]
pub struct UserWords {
    boosts: AHashMap<String, i64>,
}

impl UserWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, word: &str, boost: i64) {
        self.boosts.insert(word.to_string(), boost);
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.boosts.remove(word).is_some()
    }

    /// Boost for `word`, zero when none was set.
    pub fn boost(&self, word: &str) -> i64 {
        self.boosts.get(word).copied().unwrap_or(0)
    }

    /// Add each candidate's boost to its frequency and re-sort (stable).
    pub fn apply(&self, candidates: &mut [Candidate]) {
        if self.boosts.is_empty() {
            return;
        }
        for c in candidates.iter_mut() {
            if let Some(b) = self.boosts.get(&c.text) {
                c.frequency = c.frequency.saturating_add(*b);
            }
        }
        sort_by_frequency(candidates);
    }

    pub fn len(&self) -> usize {
        self.boosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty()
    }
}

/// Learned weights keyed by the exact input that produced the candidates.
#[derive(Debug, Clone, Default)]
pub struct PreferenceTable {
    inner: AHashMap<String, AHashMap<String, i64>>,
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `weight[input][candidate] += boost`, saturating.
    pub fn add(&mut self, input: &str, candidate: &str, boost: i64) {
        let slot = self
            .inner
            .entry(input.to_string())
            .or_default()
            .entry(candidate.to_string())
            .or_insert(0);
        *slot = slot.saturating_add(boost);
    }

    /// The candidate → weight table for `input`, if anything was recorded.
    pub fn for_input(&self, input: &str) -> Option<&AHashMap<String, i64>> {
        self.inner.get(input)
    }

    pub fn weight(&self, input: &str, candidate: &str) -> i64 {
        self.inner
            .get(input)
            .and_then(|m| m.get(candidate))
            .copied()
            .unwrap_or(0)
    }

    /// Sum another table into this one.
    pub fn merge_from(&mut self, other: &PreferenceTable) {
        for (input, weights) in other.inner.iter() {
            for (cand, w) in weights.iter() {
                self.add(input, cand, *w);
            }
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Number of distinct input keys with recorded preferences.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sorted copy of the table, used for deterministic output.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, i64>> {
        self.inner
            .iter()
            .map(|(k, v)| {
                let inner = v.iter().map(|(c, w)| (c.clone(), *w)).collect();
                (k.clone(), inner)
            })
            .collect()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.snapshot())?;
        utils::write_atomic(path.as_ref(), text.as_bytes())?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let raw: BTreeMap<String, BTreeMap<String, i64>> = serde_json::from_str(&text)?;
        let mut table = PreferenceTable::new();
        for (input, weights) in raw {
            for (cand, w) in weights {
                table.add(&input, &cand, w);
            }
        }
        Ok(table)
    }
}
