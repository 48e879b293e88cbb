// core/src/paths.rs
//
// Dictionary file resolution.
//
// Schemes never look at the filesystem layout directly; they ask a
// `DictionaryLocator` for candidate paths and load the first one that both
// exists and parses. The default `SearchPath` probes, in order:
//
//   1. an explicitly configured directory (and its `dicts/`)
//   2. $HANZI_IME_DICT_DIR (and its `dicts/`)
//   3. the executable's directory, its `dicts/`, and `../dicts/`
//   4. `src/dicts/<name>` and `dicts/<name>` relative to the working directory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::dictionary::Dictionary;

/// Environment variable naming a directory that holds dictionary files.
pub const DICT_DIR_ENV: &str = "HANZI_IME_DICT_DIR";

/// Produces the ordered list of places a dictionary file might live.
pub trait DictionaryLocator {
    fn candidate_paths(&self, file_name: &str) -> Vec<PathBuf>;
}

impl<L: DictionaryLocator + ?Sized> DictionaryLocator for Arc<L> {
    fn candidate_paths(&self, file_name: &str) -> Vec<PathBuf> {
        (**self).candidate_paths(file_name)
    }
}

impl<L: DictionaryLocator + ?Sized> DictionaryLocator for Box<L> {
    fn candidate_paths(&self, file_name: &str) -> Vec<PathBuf> {
        (**self).candidate_paths(file_name)
    }
}

/// Default locator: explicit dir, environment, executable dir, working dir.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    base_dir: Option<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `dir` before any of the built-in locations.
    pub fn with_base_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }
}

impl DictionaryLocator for SearchPath {
    fn candidate_paths(&self, file_name: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();

        if let Some(dir) = &self.base_dir {
            out.push(dir.join(file_name));
            out.push(dir.join("dicts").join(file_name));
        }

        if let Some(dir) = std::env::var_os(DICT_DIR_ENV) {
            let dir = PathBuf::from(dir);
            if !dir.as_os_str().is_empty() {
                out.push(dir.join(file_name));
                out.push(dir.join("dicts").join(file_name));
            }
        }

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            out.push(exe_dir.join(file_name));
            out.push(exe_dir.join("dicts").join(file_name));
            out.push(exe_dir.join("..").join("dicts").join(file_name));
        }

        out.push(Path::new("src").join("dicts").join(file_name));
        out.push(Path::new("dicts").join(file_name));
        out
    }
}

/// A locator that only ever offers the given paths, in order.
///
/// The file name passed by the caller is ignored.
#[derive(Debug, Clone, Default)]
pub struct FixedPaths(pub Vec<PathBuf>);

impl FixedPaths {
    /// A locator that offers nothing, forcing built-in fallbacks.
    pub fn none() -> Self {
        Self(Vec::new())
    }
}

impl DictionaryLocator for FixedPaths {
    fn candidate_paths(&self, _file_name: &str) -> Vec<PathBuf> {
        self.0.clone()
    }
}

/// Load the first candidate path that exists and parses.
///
/// Paths that are missing are skipped silently; paths that exist but fail to
/// load are logged and skipped.
pub fn load_first(
    locator: &dyn DictionaryLocator,
    file_name: &str,
) -> Option<(PathBuf, Dictionary)> {
    for path in locator.candidate_paths(file_name) {
        if !path.is_file() {
            debug!(path = %path.display(), "dictionary candidate not present");
            continue;
        }
        match Dictionary::from_file(&path) {
            Ok(dict) => return Some((path, dict)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unusable dictionary"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn search_path_order_starts_with_base_dir() {
        let sp = SearchPath::with_base_dir("/opt/ime");
        let paths = sp.candidate_paths("pinyin.dict.json");
        assert_eq!(paths[0], PathBuf::from("/opt/ime/pinyin.dict.json"));
        assert_eq!(paths[1], PathBuf::from("/opt/ime/dicts/pinyin.dict.json"));
        let n = paths.len();
        assert_eq!(paths[n - 2], PathBuf::from("src/dicts/pinyin.dict.json"));
        assert_eq!(paths[n - 1], PathBuf::from("dicts/pinyin.dict.json"));
    }

    #[test]
    fn load_first_skips_missing_and_broken() {
        let dir = tempfile::tempdir().expect("tempdir");
        let broken = dir.path().join("broken.json");
        let good = dir.path().join("good.json");
        fs::write(&broken, "{ \"entries\": ").expect("write");
        fs::write(
            &good,
            r#"{ "entries": { "ni": [ { "word": "你", "frequency": 1 } ] } }"#,
        )
        .expect("write");

        let locator = FixedPaths(vec![dir.path().join("missing.json"), broken, good.clone()]);
        let (path, dict) = load_first(&locator, "ignored").expect("good file loads");
        assert_eq!(path, good);
        assert_eq!(dict.entry_count(), 1);
    }

    #[test]
    fn load_first_none_when_nothing_resolves() {
        assert!(load_first(&FixedPaths::none(), "pinyin.dict.json").is_none());
    }
}
