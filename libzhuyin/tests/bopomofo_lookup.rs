// libzhuyin/tests/bopomofo_lookup.rs
//
// Scheme lookups against the sample bopomofo dictionary.

use std::path::PathBuf;

use hanzi_core::{FixedPaths, InputScheme};
use hanzi_zhuyin::{BopomofoMapper, BopomofoScheme, MAX_CANDIDATES};

fn sample_scheme() -> BopomofoScheme {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("dicts")
        .join("bopomofo.dict.json");
    BopomofoScheme::new(Box::new(FixedPaths(vec![path])))
}

#[test]
fn spaced_and_unspaced_input_agree() {
    let mut s = sample_scheme();
    let spaced = s.process_input("ㄓㄨㄥ ㄍㄨㄛ");
    let joined = s.process_input("ㄓㄨㄥㄍㄨㄛ");
    assert_eq!(spaced, joined);
    assert_eq!(spaced[0].text, "中國");
}

#[test]
fn results_are_ranked_and_bounded() {
    let mut s = sample_scheme();
    for input in ["ㄅㄚ", "ㄋㄧ", "ㄕ", "ㄏㄠ", "ㄊㄧㄢ", "ㄒㄧㄝㄒㄧㄝ"] {
        let out = s.process_input(input);
        assert!(!out.is_empty(), "{input}");
        assert!(out.len() <= MAX_CANDIDATES);
        assert!(out.windows(2).all(|w| w[0].frequency >= w[1].frequency), "{input}");
    }
}

#[test]
fn tags_come_from_the_file() {
    let mut s = sample_scheme();
    let out = s.process_input("ㄒㄧㄝ ㄒㄧㄝ");
    assert_eq!(out[0].text, "謝謝");
    assert_eq!(out[0].tags, vec!["polite".to_string()]);
}

#[test]
fn add_word_sets_rather_than_adds() {
    let mut s = sample_scheme();
    s.add_word("妳", 200);
    s.add_word("妳", 160);
    let out = s.process_input("ㄋㄧ");
    assert_eq!(out[0].text, "妳");
    assert_eq!(out[0].frequency, 850 + 160);
}

#[test]
fn mapper_spells_dictionary_keys() {
    let m = BopomofoMapper::new();
    assert_eq!(m.to_pinyin("ㄊㄧㄢ"), "tian");
    assert_eq!(m.to_pinyin("ㄊㄞ ㄨㄢ"), "tai uan");
    assert_eq!(m.to_pinyin("ㄒㄩㄝ ㄕㄥ"), "xve sheng");
    assert_eq!(sample_scheme().convert_to_pinyin("ㄋㄧˇ ㄏㄠˇ"), "ni3 hao3");
}
