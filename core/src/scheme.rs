// core/src/scheme.rs
//
// Input scheme capability trait.
//
// Every scheme (pinyin, bopomofo, the cangjie placeholder) exposes the same
// four operations so the engine can swap algorithms by name at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::charset::Charset;
use crate::error::ImeError;
use crate::utils;

/// The input schemes known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    Pinyin,
    Bopomofo,
    Cangjie,
}

impl SchemeKind {
    pub const ALL: [SchemeKind; 3] = [
        SchemeKind::Pinyin,
        SchemeKind::Bopomofo,
        SchemeKind::Cangjie,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeKind::Pinyin => "pinyin",
            SchemeKind::Bopomofo => "bopomofo",
            SchemeKind::Cangjie => "cangjie",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeKind {
    type Err = ImeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pinyin" => Ok(SchemeKind::Pinyin),
            "bopomofo" | "zhuyin" => Ok(SchemeKind::Bopomofo),
            "cangjie" => Ok(SchemeKind::Cangjie),
            _ => Err(ImeError::UnknownScheme(s.to_string())),
        }
    }
}

/// Common interface over candidate-generation algorithms.
///
/// Methods take `&mut self` because schemes may load their dictionary on
/// first use. Invalid or empty input yields an empty list, never an error.
pub trait InputScheme {
    fn kind(&self) -> SchemeKind;

    /// Charset the scheme's dictionary is written in.
    fn charset(&self) -> Charset;

    /// Candidates for raw user text. The default normalizes (NFC, trim) and
    /// then defers to [`candidates`](Self::candidates).
    fn process_input(&mut self, input: &str) -> Vec<Candidate> {
        let normalized = utils::normalize(input);
        if normalized.is_empty() {
            return Vec::new();
        }
        self.candidates(&normalized)
    }

    /// Ranked candidates for already-normalized input.
    fn candidates(&mut self, input: &str) -> Vec<Candidate>;

    /// Set the user boost for `word`, replacing any previous value.
    fn add_word(&mut self, word: &str, frequency: i64);

    /// Drop the user boost for `word`. Returns whether one was present.
    fn remove_word(&mut self, word: &str) -> bool;

    /// Drop any cached results. Schemes without caches ignore this.
    fn reset(&mut self) {}
}
