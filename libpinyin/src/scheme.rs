// libpinyin/src/scheme.rs
//
// Pinyin-backed implementation of `InputScheme`.

use std::rc::Rc;

use hanzi_core::{Candidate, Charset, InputScheme, SchemeKind, UserWords};

use crate::normalize_key;
use crate::parser::PinyinParser;

/// Delegates to a shared `PinyinParser`; user boosts are added on top of the
/// parser's frequencies.
pub struct PinyinScheme {
    parser: Rc<PinyinParser>,
    user_words: UserWords,
}

impl PinyinScheme {
    pub fn new(parser: Rc<PinyinParser>) -> Self {
        Self {
            parser,
            user_words: UserWords::new(),
        }
    }

    pub fn parser(&self) -> &Rc<PinyinParser> {
        &self.parser
    }

    pub fn user_words(&self) -> &UserWords {
        &self.user_words
    }
}

impl InputScheme for PinyinScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Pinyin
    }

    fn charset(&self) -> Charset {
        Charset::Simplified
    }

    /// Typed input is folded with [`normalize_key`] before lookup.
    fn process_input(&mut self, input: &str) -> Vec<Candidate> {
        let key = normalize_key(input);
        if key.is_empty() {
            return Vec::new();
        }
        self.candidates(&key)
    }

    fn candidates(&mut self, input: &str) -> Vec<Candidate> {
        let result = self.parser.parse_continuous(input);
        let mut out: Vec<Candidate> = result
            .iter_tagged()
            .map(|(word, freq, tags)| {
                Candidate::new(word, i64::from(freq)).with_tags(tags.to_vec())
            })
            .collect();
        self.user_words.apply(&mut out);
        out
    }

    fn add_word(&mut self, word: &str, frequency: i64) {
        self.user_words.set(word, frequency);
    }

    fn remove_word(&mut self, word: &str) -> bool {
        self.user_words.remove(word)
    }

    fn reset(&mut self) {
        self.parser.clear_cache();
    }
}
