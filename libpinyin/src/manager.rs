// libpinyin/src/manager.rs
//
// Candidate manager: wraps a shared `PinyinParser` with context-aware
// reordering, per-session selection state and learned preferences.

use std::rc::Rc;

use hanzi_core::{ImeError, PreferenceTable, Result};

use crate::parser::PinyinParser;

/// Upper bound on the list returned by `smart_candidates`.
pub const MAX_SMART_CANDIDATES: usize = 10;

/// Context shorter than this (in chars) is treated as sentence-initial.
pub const SHORT_CONTEXT_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    index: usize,
    text: String,
}

pub struct CandidateManager {
    parser: Rc<PinyinParser>,
    selection: Option<Selection>,
    preferences: PreferenceTable,
}

impl CandidateManager {
    pub fn new(parser: Rc<PinyinParser>) -> Self {
        Self {
            parser,
            selection: None,
            preferences: PreferenceTable::new(),
        }
    }

    pub fn parser(&self) -> &Rc<PinyinParser> {
        &self.parser
    }

    /// Plain parser output, words only.
    pub fn candidates(&self, input: &str) -> Vec<String> {
        self.parser.parse_continuous(input).candidates
    }

    /// Parser output reordered by word length against `context`.
    pub fn smart_candidates(&self, input: &str, context: &str) -> Vec<String> {
        rank_by_context(self.candidates(input), context)
    }

    /// Parser output reordered by learned weight for this exact input.
    pub fn smart_suggestions(&self, input: &str) -> Vec<String> {
        self.rank_by_preference(input, self.candidates(input))
    }

    /// Stable re-sort of any list by the weights learned for `input`.
    /// Words without a recorded weight count as zero.
    pub fn rank_by_preference<T: AsRef<str>>(&self, input: &str, mut list: Vec<T>) -> Vec<T> {
        if let Some(weights) = self.preferences.for_input(input) {
            let weight = |w: &T| weights.get(w.as_ref()).copied().unwrap_or(0);
            list.sort_by(|a, b| weight(b).cmp(&weight(a)));
        }
        list
    }

    /// Learned preferences first, then context reordering when a context is
    /// given. This is the order the engine presents.
    pub fn rank<T: AsRef<str>>(&self, input: &str, list: Vec<T>, context: &str) -> Vec<T> {
        rank_by_context(self.rank_by_preference(input, list), context)
    }

    /// Record `candidates[index]` as the current selection.
    ///
    /// Out-of-range indices fail and leave any previous selection untouched.
    pub fn select_candidate(&mut self, index: usize, candidates: &[String]) -> Result<()> {
        let text = candidates.get(index).ok_or(ImeError::IndexOutOfRange {
            index,
            len: candidates.len(),
        })?;
        self.selection = Some(Selection {
            index,
            text: text.clone(),
        });
        Ok(())
    }

    pub fn selected_candidate(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.text.as_str())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.index)
    }

    pub fn has_valid_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// `preferences[input][candidate] += boost`.
    pub fn add_user_preference(&mut self, input: &str, candidate: &str, boost: i64) {
        self.preferences.add(input, candidate, boost);
    }

    pub fn preferences(&self) -> &PreferenceTable {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: PreferenceTable) {
        self.preferences = preferences;
    }

    /// Clear the selection and the parser's cache. Preferences survive.
    pub fn reset(&mut self) {
        self.selection = None;
        self.parser.clear_cache();
    }
}

/// Reorder by char count: shortest first after a short context, longest
/// first otherwise, then cap at `MAX_SMART_CANDIDATES`.
///
/// An empty context or a list of fewer than two words comes back untouched.
pub fn rank_by_context<T: AsRef<str>>(mut list: Vec<T>, context: &str) -> Vec<T> {
    if context.is_empty() || list.len() < 2 {
        return list;
    }
    let len = |w: &T| w.as_ref().chars().count();
    if context.chars().count() < SHORT_CONTEXT_CHARS {
        list.sort_by_key(len);
    } else {
        list.sort_by(|a, b| len(b).cmp(&len(a)));
    }
    list.truncate(MAX_SMART_CANDIDATES);
    list
}
