//! hanzi-pinyin crate root
//!
//! Pinyin candidate generation on top of `hanzi-core`.
//!
//! Public API exported here:
//! - `PinyinParser` / `ParseResult` from `parser`: exact lookup, single-split
//!   segmentation, per-input cache
//! - `CandidateManager` from `manager`: context reordering, selection state,
//!   learned preferences
//! - `PinyinScheme` from `scheme`: the `InputScheme` implementation
//! - `fallback_dictionary`: small built-in entry set used when no dictionary
//!   file can be loaded

pub mod manager;
pub mod parser;
pub mod scheme;

pub use manager::{rank_by_context, CandidateManager};
pub use parser::{ParseResult, PinyinParser, MAX_CANDIDATES};
pub use scheme::PinyinScheme;

use hanzi_core::{load_first, utils, Dictionary, DictionaryLocator};
use tracing::warn;

/// Built-in pinyin entries: a few common phrases plus the single syllables
/// needed to segment them when typed without spaces.
const FALLBACK_ENTRIES: &[(&str, &str, u32)] = &[
    ("ni hao", "你好", 1000),
    ("shi jie", "世界", 800),
    ("xie xie", "谢谢", 950),
    ("jin tian", "今天", 900),
    ("ming tian", "明天", 700),
    ("ai", "爱", 600),
    ("ni", "你", 900),
    ("hao", "好", 850),
    ("hao", "号", 600),
    ("wo", "我", 950),
    ("men", "们", 700),
    ("shi", "是", 990),
    ("shi", "十", 800),
    ("de", "的", 999),
    ("xie", "谢", 800),
    ("jin", "今", 700),
    ("ming", "明", 750),
    ("tian", "天", 880),
    ("jie", "界", 600),
    ("zhong", "中", 900),
    ("guo", "国", 880),
];

/// The built-in entry set as a dictionary.
pub fn fallback_dictionary() -> Dictionary {
    Dictionary::from_triples(FALLBACK_ENTRIES)
}

/// Canonical lookup key for typed pinyin: NFC, lowercase, single spaces.
///
/// "Ni  Hao" and "ni hao" share one key, and therefore one cache slot and
/// one set of learned preferences.
pub fn normalize_key(input: &str) -> String {
    utils::normalize_spacing(input).to_lowercase()
}

/// Load `file_name` through `locator`, or fall back to the built-in entries.
pub fn load_dictionary(locator: &dyn DictionaryLocator, file_name: &str) -> Dictionary {
    match load_first(locator, file_name) {
        Some((_, dict)) => dict,
        None => {
            warn!(file = file_name, "no pinyin dictionary found, using built-in entries");
            fallback_dictionary()
        }
    }
}
