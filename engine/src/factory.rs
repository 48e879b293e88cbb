// engine/src/factory.rs
//
// Scheme factory: builds an `InputScheme` by name.
//
// Pinyin schemes share the factory's parser (and therefore its cache);
// bopomofo schemes get their own lazily-loaded dictionary through the shared
// locator. Cangjie is registered but not implemented: it accepts user words
// and always returns no candidates.

use std::rc::Rc;
use std::sync::Arc;

use hanzi_core::{Candidate, Charset, DictionaryLocator, InputScheme, SchemeKind, UserWords};
use hanzi_pinyin::{PinyinParser, PinyinScheme};
use hanzi_zhuyin::BopomofoScheme;

/// Placeholder for the cangjie shape-based scheme. Never yields candidates.
#[derive(Debug, Default)]
pub struct CangjieScheme {
    user_words: UserWords,
}

impl CangjieScheme {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputScheme for CangjieScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Cangjie
    }

    fn charset(&self) -> Charset {
        Charset::Traditional
    }

    fn candidates(&mut self, _input: &str) -> Vec<Candidate> {
        Vec::new()
    }

    fn add_word(&mut self, word: &str, frequency: i64) {
        self.user_words.set(word, frequency);
    }

    fn remove_word(&mut self, word: &str) -> bool {
        self.user_words.remove(word)
    }
}

pub struct SchemeFactory {
    parser: Rc<PinyinParser>,
    locator: Arc<dyn DictionaryLocator>,
    bopomofo_file: String,
}

impl SchemeFactory {
    pub fn new(
        parser: Rc<PinyinParser>,
        locator: Arc<dyn DictionaryLocator>,
        bopomofo_file: &str,
    ) -> Self {
        Self {
            parser,
            locator,
            bopomofo_file: bopomofo_file.to_string(),
        }
    }

    /// Build the scheme registered under `name`. Unknown names yield `None`.
    pub fn create(&self, name: &str) -> Option<Box<dyn InputScheme>> {
        let kind = name.parse::<SchemeKind>().ok()?;
        Some(self.create_kind(kind))
    }

    pub fn create_kind(&self, kind: SchemeKind) -> Box<dyn InputScheme> {
        match kind {
            SchemeKind::Pinyin => Box::new(PinyinScheme::new(Rc::clone(&self.parser))),
            SchemeKind::Bopomofo => Box::new(BopomofoScheme::with_file_name(
                Box::new(Arc::clone(&self.locator)),
                &self.bopomofo_file,
            )),
            SchemeKind::Cangjie => Box::new(CangjieScheme::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_core::FixedPaths;
    use hanzi_pinyin::fallback_dictionary;

    fn factory() -> SchemeFactory {
        let parser = Rc::new(PinyinParser::new(Arc::new(fallback_dictionary())));
        SchemeFactory::new(parser, Arc::new(FixedPaths::none()), "bopomofo.dict.json")
    }

    #[test]
    fn creates_known_schemes() {
        let f = factory();
        for kind in SchemeKind::ALL {
            let scheme = f.create(kind.as_str()).expect("known scheme");
            assert_eq!(scheme.kind(), kind);
        }
        assert_eq!(f.create("Zhuyin").map(|s| s.kind()), Some(SchemeKind::Bopomofo));
    }

    #[test]
    fn unknown_name_is_none() {
        let f = factory();
        assert!(f.create("wubi").is_none());
        assert!(f.create("").is_none());
    }

    #[test]
    fn cangjie_is_empty_placeholder() {
        let mut s = factory().create("cangjie").expect("cangjie");
        s.add_word("日", 10);
        assert!(s.process_input("a").is_empty());
        assert!(s.remove_word("日"));
    }

    #[test]
    fn pinyin_schemes_share_parser_cache() {
        let f = factory();
        let mut a = f.create("pinyin").expect("pinyin");
        let mut b = f.create("pinyin").expect("pinyin");
        a.process_input("nihao");
        b.process_input("nihao");
        assert_eq!(f.parser.cache_stats(), (1, 1));
    }
}
