// engine/src/engine.rs
//
// Input engine facade: the public query surface over schemes, the candidate
// manager and the charset converter.
//
// `process_input` pipeline:
//   1. current scheme produces candidates in its own charset
//   2. optional stable frequency sort
//   3. pinyin only: learned preferences, then context reordering
//   4. conversion to the output charset
//
// The converted list is remembered so `select_candidate(index)` can refer to
// it. Every operation fails with `ImeError::Uninitialized` until
// `initialize` (or `initialize_with`) has succeeded.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use hanzi_core::{
    sort_by_frequency, Candidate, Charset, CharsetConverter, Config, DictionaryLocator, ImeError,
    InputScheme, PreferenceTable, Result, SchemeKind, SearchPath,
};
use hanzi_pinyin::{load_dictionary, normalize_key, CandidateManager, PinyinParser};
use tracing::{debug, info, warn};

use crate::factory::SchemeFactory;

/// Result of the last `process_input`, kept for selection.
#[derive(Default)]
struct LastQuery {
    scheme: Option<SchemeKind>,
    key: String,
    /// Candidate text before charset conversion, index-aligned with `shown`.
    native: Vec<String>,
    shown: Vec<Candidate>,
}

struct EngineState {
    config: Config,
    converter: CharsetConverter,
    parser: Rc<PinyinParser>,
    manager: CandidateManager,
    schemes: HashMap<SchemeKind, Box<dyn InputScheme>>,
    current: SchemeKind,
    charset: Charset,
    last: LastQuery,
}

impl EngineState {
    fn scheme_mut(&mut self, kind: SchemeKind) -> Result<&mut Box<dyn InputScheme>> {
        self.schemes
            .get_mut(&kind)
            .ok_or_else(|| ImeError::UnknownScheme(kind.as_str().to_string()))
    }

    fn enabled_kind(&self, name: &str) -> Result<SchemeKind> {
        let kind = name.parse::<SchemeKind>()?;
        if self.schemes.contains_key(&kind) {
            Ok(kind)
        } else {
            Err(ImeError::UnknownScheme(name.to_string()))
        }
    }

    /// Steps 1-3 of the pipeline: native-charset candidates plus the lookup
    /// key learned preferences are stored under.
    fn ranked(
        &mut self,
        kind: SchemeKind,
        input: &str,
        context: &str,
    ) -> Result<(String, Vec<Candidate>)> {
        let frequency_sort = self.config.frequency_sort;
        let context_ranking = self.config.context_ranking;

        let scheme = self.scheme_mut(kind)?;
        let mut list = scheme.process_input(input);
        if frequency_sort {
            sort_by_frequency(&mut list);
        }

        let key = match kind {
            SchemeKind::Pinyin => normalize_key(input),
            _ => hanzi_core::utils::normalize(input),
        };
        if kind == SchemeKind::Pinyin && context_ranking {
            list = self.manager.rank(&key, list, context);
        }
        Ok((key, list))
    }

    fn to_charset(&self, list: &[Candidate], from: Charset, to: Charset) -> Vec<Candidate> {
        list.iter()
            .map(|c| Candidate {
                text: self.converter.convert(&c.text, from, to),
                frequency: c.frequency,
                tags: c.tags.clone(),
            })
            .collect()
    }

    /// `word` folded into the scheme's own charset. Characters already in
    /// that charset are left alone, so either spelling is accepted.
    fn to_native(&self, word: &str, kind: SchemeKind) -> String {
        let native = self.native_charset(kind);
        self.converter.convert(word, native.other(), native)
    }

    fn native_charset(&self, kind: SchemeKind) -> Charset {
        self.schemes
            .get(&kind)
            .map(|s| s.charset())
            .unwrap_or(self.charset)
    }
}

/// Candidate-generation engine. Single-threaded; create one per session.
#[derive(Default)]
pub struct ImeEngine {
    state: Option<EngineState>,
}

impl ImeEngine {
    /// An engine that refuses every operation until initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `config_path` and set up every enabled scheme.
    ///
    /// A missing config file means defaults. A file that exists but cannot be
    /// read or parsed is an error and leaves the engine uninitialized.
    pub fn initialize<P: AsRef<Path>>(&mut self, config_path: P) -> Result<()> {
        let path = config_path.as_ref();
        let config = if path.exists() {
            Config::load_toml(path)?
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        };
        let locator: Arc<dyn DictionaryLocator> = match &config.dict_dir {
            Some(dir) => Arc::new(SearchPath::with_base_dir(dir)),
            None => Arc::new(SearchPath::new()),
        };
        self.initialize_with(config, locator)
    }

    /// Initialize from an in-memory config and an explicit locator.
    ///
    /// Dictionary files that cannot be found or parsed are replaced by the
    /// built-in entry sets, so this only fails on configuration errors.
    pub fn initialize_with(
        &mut self,
        config: Config,
        locator: Arc<dyn DictionaryLocator>,
    ) -> Result<()> {
        if !config.is_enabled(config.default_scheme) {
            return Err(ImeError::Config(format!(
                "default scheme {} is not enabled",
                config.default_scheme
            )));
        }

        let dict = load_dictionary(locator.as_ref(), &config.pinyin_dictionary);
        let parser = Rc::new(PinyinParser::new(Arc::new(dict)));
        let mut manager = CandidateManager::new(Rc::clone(&parser));
        if let Some(path) = &config.preferences_path {
            if path.exists() {
                match PreferenceTable::load_json(path) {
                    Ok(prefs) => manager.set_preferences(prefs),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "ignoring unreadable preferences")
                    }
                }
            }
        }

        let factory = SchemeFactory::new(Rc::clone(&parser), locator, &config.bopomofo_dictionary);
        let mut schemes = HashMap::new();
        for kind in &config.enabled_schemes {
            schemes.insert(*kind, factory.create_kind(*kind));
        }

        info!(
            scheme = %config.default_scheme,
            charset = %config.charset,
            schemes = schemes.len(),
            "engine initialized"
        );
        self.state = Some(EngineState {
            current: config.default_scheme,
            charset: config.charset,
            config,
            converter: CharsetConverter::new(),
            parser,
            manager,
            schemes,
            last: LastQuery::default(),
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> Result<&EngineState> {
        self.state.as_ref().ok_or(ImeError::Uninitialized)
    }

    fn state_mut(&mut self) -> Result<&mut EngineState> {
        self.state.as_mut().ok_or(ImeError::Uninitialized)
    }

    /// Ranked candidates for `input` from the current scheme, in the output
    /// charset. `context` is the text already committed before the cursor.
    pub fn process_input(&mut self, input: &str, context: &str) -> Result<Vec<Candidate>> {
        let st = self.state_mut()?;
        let kind = st.current;
        let (key, native) = st.ranked(kind, input, context)?;
        let shown = st.to_charset(&native, st.native_charset(kind), st.charset);
        debug!(input, scheme = %kind, count = shown.len(), "processed input");

        st.manager.clear_selection();
        st.last = LastQuery {
            scheme: Some(kind),
            key,
            native: native.into_iter().map(|c| c.text).collect(),
            shown: shown.clone(),
        };
        Ok(shown)
    }

    /// Select entry `index` of the last `process_input` result.
    ///
    /// Out-of-range indices fail with `IndexOutOfRange` and change nothing.
    /// With learning enabled, selecting a pinyin candidate adds the configured
    /// boost to its preference weight for the same input.
    pub fn select_candidate(&mut self, index: usize) -> Result<Candidate> {
        let st = self.state_mut()?;
        st.manager.select_candidate(index, &st.last.native)?;
        let chosen = st.last.shown[index].clone();

        if st.config.learn_from_selection && st.last.scheme == Some(SchemeKind::Pinyin) {
            let boost = st.config.selection_boost;
            st.manager
                .add_user_preference(&st.last.key, &st.last.native[index], boost);
            debug!(key = %st.last.key, word = %st.last.native[index], boost, "learned selection");
        }
        Ok(chosen)
    }

    /// The candidate picked by the last successful `select_candidate`, if
    /// the input has not changed since.
    pub fn selected_candidate(&self) -> Result<Option<&Candidate>> {
        let st = self.state()?;
        Ok(st.manager.selected_index().and_then(|i| st.last.shown.get(i)))
    }

    /// Set a user boost for `word` in the named scheme.
    ///
    /// `word` may be written in either charset; it is stored in the scheme's
    /// own charset so it matches that scheme's candidates.
    pub fn add_word(&mut self, scheme: &str, word: &str, frequency: i64) -> Result<()> {
        let st = self.state_mut()?;
        let kind = st.enabled_kind(scheme)?;
        let native = st.to_native(word, kind);
        st.scheme_mut(kind)?.add_word(&native, frequency);
        Ok(())
    }

    /// Remove a user boost. Returns whether one existed.
    pub fn remove_word(&mut self, scheme: &str, word: &str) -> Result<bool> {
        let st = self.state_mut()?;
        let kind = st.enabled_kind(scheme)?;
        let native = st.to_native(word, kind);
        Ok(st.scheme_mut(kind)?.remove_word(&native))
    }

    /// Switch the active scheme. Clears the remembered candidate list.
    pub fn set_scheme(&mut self, name: &str) -> Result<()> {
        let st = self.state_mut()?;
        st.current = st.enabled_kind(name)?;
        st.last = LastQuery::default();
        st.manager.clear_selection();
        Ok(())
    }

    pub fn set_charset(&mut self, name: &str) -> Result<()> {
        let charset = name.parse::<Charset>()?;
        self.state_mut()?.charset = charset;
        Ok(())
    }

    /// Convert `text` between two named charsets.
    pub fn convert(&self, text: &str, from: &str, to: &str) -> Result<String> {
        let st = self.state()?;
        let from = from.parse::<Charset>()?;
        let to = to.parse::<Charset>()?;
        Ok(st.converter.convert(text, from, to))
    }

    /// Candidates from a named scheme in a named charset, without touching
    /// the current scheme or the remembered list.
    pub fn cross_candidates(
        &mut self,
        input: &str,
        scheme: &str,
        charset: &str,
    ) -> Result<Vec<Candidate>> {
        let st = self.state_mut()?;
        let kind = st.enabled_kind(scheme)?;
        let to = charset.parse::<Charset>()?;
        let (_, native) = st.ranked(kind, input, "")?;
        Ok(st.to_charset(&native, st.native_charset(kind), to))
    }

    /// Top candidate of a named scheme converted to a named charset, or the
    /// input unchanged when there is none.
    pub fn process_cross_input(
        &mut self,
        input: &str,
        context: &str,
        scheme: &str,
        charset: &str,
    ) -> Result<String> {
        let st = self.state_mut()?;
        let kind = st.enabled_kind(scheme)?;
        let to = charset.parse::<Charset>()?;
        let (_, native) = st.ranked(kind, input, context)?;
        Ok(match native.first() {
            Some(top) => st.converter.convert(&top.text, st.native_charset(kind), to),
            None => input.to_string(),
        })
    }

    /// Clear selection state, remembered candidates and every scheme cache.
    /// User words and learned preferences are kept.
    pub fn reset(&mut self) -> Result<()> {
        let st = self.state_mut()?;
        st.manager.reset();
        for scheme in st.schemes.values_mut() {
            scheme.reset();
        }
        st.last = LastQuery::default();
        Ok(())
    }

    /// Save learned preferences to the configured path.
    ///
    /// Returns `Ok(false)` when no path is configured.
    pub fn save_preferences(&self) -> Result<bool> {
        let st = self.state()?;
        match &st.config.preferences_path {
            Some(path) => {
                st.manager.preferences().save_json(path)?;
                info!(
                    path = %path.display(),
                    inputs = st.manager.preferences().len(),
                    "saved preferences"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn current_scheme(&self) -> Result<SchemeKind> {
        Ok(self.state()?.current)
    }

    pub fn charset(&self) -> Result<Charset> {
        Ok(self.state()?.charset)
    }

    pub fn config(&self) -> Result<&Config> {
        Ok(&self.state()?.config)
    }

    pub fn last_candidates(&self) -> Result<&[Candidate]> {
        Ok(&self.state()?.last.shown)
    }

    pub fn preferences(&self) -> Result<&PreferenceTable> {
        Ok(self.state()?.manager.preferences())
    }

    /// Pinyin parser cache statistics as `(hits, misses)`.
    pub fn cache_stats(&self) -> Result<(usize, usize)> {
        Ok(self.state()?.parser.cache_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_core::FixedPaths;

    fn engine() -> ImeEngine {
        let mut e = ImeEngine::new();
        e.initialize_with(Config::default(), Arc::new(FixedPaths::none()))
            .expect("init");
        e
    }

    #[test]
    fn uninitialized_fails_fast() {
        let mut e = ImeEngine::new();
        assert!(matches!(e.process_input("ni", ""), Err(ImeError::Uninitialized)));
        assert!(matches!(e.select_candidate(0), Err(ImeError::Uninitialized)));
        assert!(matches!(e.set_scheme("pinyin"), Err(ImeError::Uninitialized)));
        assert!(matches!(e.set_charset("simplified"), Err(ImeError::Uninitialized)));
        assert!(matches!(e.add_word("pinyin", "你", 1), Err(ImeError::Uninitialized)));
        assert!(matches!(e.remove_word("pinyin", "你"), Err(ImeError::Uninitialized)));
        assert!(matches!(e.convert("爱", "s", "t"), Err(ImeError::Uninitialized)));
        assert!(!e.is_initialized());
    }

    #[test]
    fn pinyin_output_is_converted() {
        let mut e = engine();
        let out = e.process_input("xie xie", "").expect("query");
        assert_eq!(out[0].text, "謝謝");
        e.set_charset("simplified").unwrap();
        let out = e.process_input("xie xie", "").expect("query");
        assert_eq!(out[0].text, "谢谢");
    }

    #[test]
    fn selection_learns_preference() {
        let mut e = engine();
        let out = e.process_input("nihao", "").unwrap();
        assert_eq!(out[0].text, "你好");
        assert_eq!(out[1].text, "你號");

        let picked = e.select_candidate(1).unwrap();
        assert_eq!(picked.text, "你號");
        assert_eq!(e.selected_candidate().unwrap().map(|c| c.text.as_str()), Some("你號"));
        assert_eq!(e.preferences().unwrap().weight("nihao", "你号"), 1);

        let out = e.process_input("nihao", "").unwrap();
        assert_eq!(out[0].text, "你號");
    }

    #[test]
    fn bad_selection_changes_nothing() {
        let mut e = engine();
        e.process_input("hao", "").unwrap();
        e.select_candidate(0).unwrap();
        let err = e.select_candidate(7).unwrap_err();
        assert!(matches!(err, ImeError::IndexOutOfRange { index: 7, len: 2 }));
        assert_eq!(e.selected_candidate().unwrap().map(|c| c.text.as_str()), Some("好"));
        assert_eq!(e.preferences().unwrap().weight("hao", "好"), 1);
    }

    #[test]
    fn scheme_switching() {
        let mut e = engine();
        e.set_scheme("bopomofo").unwrap();
        assert_eq!(e.current_scheme().unwrap(), SchemeKind::Bopomofo);
        let out = e.process_input("ㄓㄨㄥ ㄍㄨㄛ", "").unwrap();
        assert_eq!(out[0].text, "中國");
        e.set_charset("simplified").unwrap();
        let out = e.process_input("ㄓㄨㄥ ㄍㄨㄛ", "").unwrap();
        assert_eq!(out[0].text, "中国");

        assert!(matches!(e.set_scheme("wubi"), Err(ImeError::UnknownScheme(_))));
        assert_eq!(e.current_scheme().unwrap(), SchemeKind::Bopomofo);

        e.set_scheme("cangjie").unwrap();
        assert!(e.process_input("abc", "").unwrap().is_empty());
    }

    #[test]
    fn add_word_accepts_output_charset() {
        let mut e = engine();
        // output is traditional; the pinyin scheme stores simplified text
        e.add_word("pinyin", "號", 1000).unwrap();
        assert_eq!(e.process_input("hao", "").unwrap()[0].text, "號");
        assert!(e.remove_word("pinyin", "号").unwrap());
        assert_eq!(e.process_input("hao", "").unwrap()[0].text, "好");
        assert!(matches!(e.add_word("wubi", "x", 1), Err(ImeError::UnknownScheme(_))));
    }

    #[test]
    fn add_word_accepts_either_charset() {
        let mut e = engine();
        e.set_charset("simplified").unwrap();
        e.add_word("pinyin", "號", 1000).unwrap();
        assert_eq!(e.process_input("hao", "").unwrap()[0].text, "号");
        assert!(e.remove_word("pinyin", "號").unwrap());
        assert!(!e.remove_word("pinyin", "号").unwrap());

        // bopomofo words are traditional; a simplified spelling still lands
        e.add_word("bopomofo", "号", 5000).unwrap();
        e.set_scheme("bopomofo").unwrap();
        let out = e.process_input("ㄏㄠ", "").unwrap();
        assert_eq!(out[0].text, "号");
        assert_eq!(out[0].frequency, 5950);
        assert!(e.remove_word("bopomofo", "號").unwrap());
    }

    #[test]
    fn context_reorders_pinyin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pinyin.dict.json");
        std::fs::write(
            &path,
            r#"{ "entries": { "shi": [
                { "word": "是", "frequency": 990 },
                { "word": "世界", "frequency": 900 },
                { "word": "时", "frequency": 700 }
            ] } }"#,
        )
        .expect("write");
        let mut e = ImeEngine::new();
        e.initialize_with(Config::default(), Arc::new(FixedPaths(vec![path])))
            .expect("init");

        let texts = |v: Vec<Candidate>| v.into_iter().map(|c| c.text).collect::<Vec<_>>();
        assert_eq!(texts(e.process_input("shi", "").unwrap()), vec!["是", "世界", "時"]);
        assert_eq!(texts(e.process_input("shi", "我").unwrap()), vec!["是", "時", "世界"]);
        assert_eq!(texts(e.process_input("shi", "一二三四五六").unwrap()), vec!["世界", "是", "時"]);
    }

    #[test]
    fn convert_by_name() {
        let e = engine();
        assert_eq!(e.convert("爱国", "simplified", "traditional").unwrap(), "愛國");
        assert!(matches!(e.convert("x", "simplified", "latin"), Err(ImeError::UnknownCharset(_))));
    }

    #[test]
    fn cross_input() {
        let mut e = engine();
        assert_eq!(e.process_cross_input("ㄋㄧ ㄏㄠ", "", "bopomofo", "simplified").unwrap(), "你好");
        assert_eq!(e.process_cross_input("qqq", "", "pinyin", "traditional").unwrap(), "qqq");
        let list = e.cross_candidates("guo", "pinyin", "traditional").unwrap();
        assert_eq!(list[0].text, "國");
        assert_eq!(e.current_scheme().unwrap(), SchemeKind::Pinyin);
        assert!(e.last_candidates().unwrap().is_empty());
    }

    #[test]
    fn reset_keeps_preferences() {
        let mut e = engine();
        e.process_input("hao", "").unwrap();
        e.select_candidate(1).unwrap();
        e.reset().unwrap();
        assert_eq!(e.cache_stats().unwrap(), (0, 0));
        assert!(e.last_candidates().unwrap().is_empty());
        assert_eq!(e.preferences().unwrap().weight("hao", "号"), 1);
    }

    #[test]
    fn default_scheme_must_be_enabled() {
        let mut cfg = Config::default();
        cfg.enabled_schemes = vec![SchemeKind::Bopomofo];
        let mut e = ImeEngine::new();
        let err = e.initialize_with(cfg, Arc::new(FixedPaths::none())).unwrap_err();
        assert!(matches!(err, ImeError::Config(_)));
        assert!(!e.is_initialized());
    }
}
