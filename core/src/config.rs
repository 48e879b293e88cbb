//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default so a partial file (or no file
//! at all) is valid:
//!
//! ```toml
//! default_scheme = "bopomofo"
//! charset = "simplified"
//! dict_dir = "/usr/share/hanzi-ime"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::error::Result;
use crate::scheme::SchemeKind;
use crate::utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme active right after initialize.
    pub default_scheme: SchemeKind,
    /// Output charset. Candidates are converted from each scheme's own charset.
    pub charset: Charset,
    /// Schemes the engine creates through the factory.
    pub enabled_schemes: Vec<SchemeKind>,

    /// Directory probed before the environment variable and built-in paths.
    pub dict_dir: Option<PathBuf>,
    pub pinyin_dictionary: String,
    pub bopomofo_dictionary: String,

    // Ranking
    /// Stable re-sort of scheme output by frequency before context ranking.
    pub frequency_sort: bool,
    /// Let the candidate manager reorder pinyin results by context and
    /// learned preferences.
    pub context_ranking: bool,

    // Learning
    pub learn_from_selection: bool,
    /// Weight added to a candidate each time it is selected.
    pub selection_boost: i64,
    /// Where learned preferences are saved, if anywhere.
    pub preferences_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_scheme: SchemeKind::Pinyin,
            charset: Charset::Traditional,
            enabled_schemes: SchemeKind::ALL.to_vec(),
            dict_dir: None,
            pinyin_dictionary: "pinyin.dict.json".to_string(),
            bopomofo_dictionary: "bopomofo.dict.json".to_string(),
            frequency_sort: true,
            context_ranking: true,
            learn_from_selection: true,
            selection_boost: 1,
            preferences_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        utils::write_atomic(path.as_ref(), content.as_bytes())?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn is_enabled(&self, kind: SchemeKind) -> bool {
        self.enabled_schemes.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImeError;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.default_scheme, SchemeKind::Pinyin);
        assert_eq!(cfg.charset, Charset::Traditional);
        assert!(cfg.frequency_sort);
        assert!(cfg.is_enabled(SchemeKind::Cangjie));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml_str(
            "default_scheme = \"bopomofo\"\ncharset = \"simplified\"\nselection_boost = 5\n",
        )
        .expect("parse");
        assert_eq!(cfg.default_scheme, SchemeKind::Bopomofo);
        assert_eq!(cfg.charset, Charset::Simplified);
        assert_eq!(cfg.selection_boost, 5);
        assert_eq!(cfg.pinyin_dictionary, "pinyin.dict.json");
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = Config::from_toml_str("charset = \"klingon\"").unwrap_err();
        assert!(matches!(err, ImeError::Config(_)));
    }

    #[test]
    fn toml_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ime.toml");
        let mut cfg = Config::default();
        cfg.dict_dir = Some(PathBuf::from("/tmp/dicts"));
        cfg.enabled_schemes = vec![SchemeKind::Pinyin];
        cfg.save_toml(&path).expect("save");
        assert_eq!(Config::load_toml(&path).expect("load"), cfg);
    }
}
