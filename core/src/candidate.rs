//! Scheme-level candidate type.
//!
//! A `Candidate` is what an input scheme hands back to callers: the text to
//! commit, the ranking frequency (dictionary prior plus any user boost) and
//! free-form tags carried over from the dictionary entry. Candidates are
//! produced fresh per query and never persisted.

use serde::{Deserialize, Serialize};

use crate::dictionary::DictEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The word or phrase to commit.
    pub text: String,
    /// Higher is better. Signed so negative user boosts can demote.
    pub frequency: i64,
    pub tags: Vec<String>,
}

impl Candidate {
    pub fn new<T: Into<String>>(text: T, frequency: i64) -> Self {
        Candidate {
            text: text.into(),
            frequency,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&DictEntry> for Candidate {
    fn from(entry: &DictEntry) -> Self {
        Candidate {
            text: entry.word.clone(),
            frequency: i64::from(entry.frequency),
            tags: entry.tags.clone(),
        }
    }
}

/// Sort by frequency, highest first. Stable, so equal frequencies keep their
/// incoming order.
pub fn sort_by_frequency(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.frequency.cmp(&a.frequency));
}
