//! hanzi-core
//!
//! Shared building blocks for the hanzi input crates (hanzi-pinyin,
//! hanzi-zhuyin, hanzi-engine).
//!
//! Public API:
//! - `Dictionary` / `DictEntry` - pronunciation-indexed store and its JSON format
//! - `DictionaryLocator` / `SearchPath` - where dictionary files are looked up
//! - `CharsetConverter` / `Charset` - simplified/traditional conversion
//! - `InputScheme` / `SchemeKind` - the capability every scheme implements
//! - `Candidate` - user-facing ranked candidate
//! - `UserWords` / `PreferenceTable` - manual boosts and learned preferences
//! - `Config` - TOML configuration
//! - `ImeError` - error type for everything above

pub mod candidate;
pub use candidate::{sort_by_frequency, Candidate};

pub mod charset;
pub use charset::{Charset, CharsetConverter};

pub mod config;
pub use config::Config;

pub mod dictionary;
pub use dictionary::{DictEntry, Dictionary};

pub mod error;
pub use error::{ImeError, Result};

pub mod paths;
pub use paths::{load_first, DictionaryLocator, FixedPaths, SearchPath, DICT_DIR_ENV};

pub mod scheme;
pub use scheme::{InputScheme, SchemeKind};

pub mod userdict;
pub use userdict::{PreferenceTable, UserWords};

/// Utility helpers.
pub mod utils {
    use std::io::Write;
    use std::path::Path;

    use unicode_normalization::UnicodeNormalization;

    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        s.nfc().collect::<String>().trim().to_string()
    }

    /// NFC, trim, and collapse every internal whitespace run to one space.
    pub fn normalize_spacing(s: &str) -> String {
        let nfc: String = s.nfc().collect();
        nfc.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Remove all whitespace.
    pub fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Current UTC time in RFC 3339 form.
    pub fn timestamp() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    /// Write `bytes` to a temporary file next to `path`, then rename it over
    /// `path`. Either the old contents or the new ones survive, never a mix.
    pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn spacing_is_collapsed() {
            assert_eq!(normalize_spacing("  ㄋㄧˇ \t  ㄏㄠˇ "), "ㄋㄧˇ ㄏㄠˇ");
            assert_eq!(strip_whitespace("ni  hao "), "nihao");
            assert_eq!(normalize("  nihao\n"), "nihao");
        }

        #[test]
        fn atomic_write_replaces() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("nested").join("f.txt");
            write_atomic(&path, b"one").expect("first");
            write_atomic(&path, b"two").expect("second");
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
        }
    }
}
