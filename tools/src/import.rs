// tools/src/import.rs
//
// Text table → dictionary import.
//
// One entry per line: `key<TAB>word[<TAB>frequency[<TAB>tag,tag]]`, or the
// same fields separated by runs of spaces when no tab is present. Keys written
// with apostrophe separators (`ni'hao`) are stored space-separated
// (`ni hao`). Blank lines and `#` comments are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use hanzi_core::{DictEntry, Dictionary};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static KEY_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"['\s]+").expect("static regex"));

/// Counts reported after an import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Canonical key: lowercase, apostrophes and whitespace runs become one space.
pub fn normalize_key(raw: &str) -> String {
    KEY_SEPARATORS
        .replace_all(raw.trim().trim_matches('\''), " ")
        .to_lowercase()
}

/// Parse one table line. Returns None for blank, comment or short lines.
pub fn parse_line(line: &str) -> Option<(String, DictEntry)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let parts: Vec<&str> = if line.contains('\t') {
        line.split('\t').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };
    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    let key = normalize_key(parts[0]);
    let freq = parts
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .map(|f| u32::try_from(f).unwrap_or(u32::MAX))
        .unwrap_or(1);
    let tags: Vec<String> = parts
        .get(3)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    let entry = DictEntry::new(parts[1], freq, key.clone()).with_tags(tags);
    Some((key, entry))
}

/// Append every entry of `input` to `dict`.
pub fn import_table(dict: &mut Dictionary, input: &Path) -> Result<ImportReport> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let reader = BufReader::new(file);
    let mut report = ImportReport::default();
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some((key, entry)) => {
                dict.add_entry(&key, entry);
                report.imported += 1;
            }
            None if line.trim().is_empty() || line.trim_start().starts_with('#') => {}
            None => {
                debug!(line = %line, "skipping malformed table line");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_separated_line() {
        let (key, e) = parse_line("ni'hao\t你好\t1000\tgreeting, common").unwrap();
        assert_eq!(key, "ni hao");
        assert_eq!(e.word, "你好");
        assert_eq!(e.frequency, 1000);
        assert_eq!(e.pronunciation, "ni hao");
        assert_eq!(e.tags, vec!["greeting", "common"]);
    }

    #[test]
    fn space_separated_line_defaults_frequency() {
        let (key, e) = parse_line("ㄋㄧ  你").unwrap();
        assert_eq!(key, "ㄋㄧ");
        assert_eq!(e.frequency, 1);
        assert!(e.tags.is_empty());
    }

    #[test]
    fn skips_comments_and_short_lines() {
        assert!(parse_line("# header").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("lonely").is_none());
    }

    #[test]
    fn import_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        std::fs::write(&path, "# pinyin\nni\t你\t900\nbroken\n\nhao\t好\t850\n").unwrap();
        let mut dict = Dictionary::new();
        let report = import_table(&mut dict, &path).unwrap();
        assert_eq!(report, ImportReport { imported: 2, skipped: 1 });
        assert_eq!(dict.lookup("hao")[0].word, "好");
    }
}
