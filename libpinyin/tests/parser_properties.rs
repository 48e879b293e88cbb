// libpinyin/tests/parser_properties.rs
//
// Parser and candidate manager behavior over the sample pinyin dictionary.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use hanzi_core::{DictEntry, Dictionary};
use hanzi_pinyin::{CandidateManager, PinyinParser, MAX_CANDIDATES};

fn sample_parser() -> PinyinParser {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("dicts")
        .join("pinyin.dict.json");
    let dict = Dictionary::from_file(path).expect("sample dictionary");
    PinyinParser::new(Arc::new(dict))
}

const INPUTS: &[&str] = &[
    "ni hao", "nihao", "shi", "shijie", "zhongguo", "zhongwen", "xiexie", "dajia",
    "diannao", "woaini", "kaishi", "xuesheng", "q", "", "ü", "你好",
];

#[test]
fn frequencies_never_increase() {
    let p = sample_parser();
    for input in INPUTS {
        let r = p.parse_continuous(input);
        assert_eq!(r.candidates.len(), r.frequencies.len(), "{input}");
        assert!(r.len() <= MAX_CANDIDATES, "{input}");
        assert!(
            r.frequencies.windows(2).all(|w| w[0] >= w[1]),
            "{input}: {:?}",
            r.frequencies
        );
    }
}

#[test]
fn words_are_unique() {
    let p = sample_parser();
    for input in INPUTS {
        let r = p.parse_continuous(input);
        let mut seen = std::collections::HashSet::new();
        assert!(r.candidates.iter().all(|w| seen.insert(w.clone())), "{input}");
    }
}

#[test]
fn segmentation_over_sample() {
    let p = sample_parser();
    let r = p.parse_continuous("zhongguo");
    // zhong|guo: 中国 exists only as "zhong guo", so segmentation builds it
    assert_eq!(r.candidates[0], "中国");
    assert_eq!(r.frequencies[0], 880);
    assert!(p.parse_continuous("woaini").is_empty());
}

#[test]
fn repeated_input_hits_cache() {
    let p = sample_parser();
    let first = p.parse_continuous("shijie");
    let second = p.parse_continuous("shijie");
    assert_eq!(first, second);
    assert_eq!(p.cache_stats(), (1, 1));
    assert_eq!(p.cache_hit_rate(), Some(50.0));
}

#[test]
fn stale_result_served_until_cleared() {
    let mut dict = Dictionary::from_triples(&[("ni", "你", 500), ("hao", "好", 500)]);
    let p = PinyinParser::new(Arc::new(dict.clone()));
    let before = p.parse_continuous("nihao");

    // a parser over an edited copy sees the edit; the original keeps serving
    // its cached answer
    dict.add_entry("nihao", DictEntry::new("拟好", 9999, "nihao"));
    let edited = PinyinParser::new(Arc::new(dict));
    assert_eq!(edited.parse_continuous("nihao").candidates[0], "拟好");
    assert_eq!(p.parse_continuous("nihao"), before);
    assert_eq!(p.cache_stats(), (1, 1));
}

#[test]
fn manager_over_sample() {
    let parser = Rc::new(sample_parser());
    let mut m = CandidateManager::new(Rc::clone(&parser));
    let plain = m.candidates("shi");
    assert_eq!(plain[0], "是");

    m.add_user_preference("shi", "事", 5);
    m.add_user_preference("shi", "十", 2);
    let boosted = m.smart_suggestions("shi");
    assert_eq!(&boosted[..2], &["事".to_string(), "十".to_string()]);

    m.select_candidate(0, &boosted).unwrap();
    assert_eq!(m.selected_candidate(), Some("事"));
    assert!(m.select_candidate(boosted.len(), &boosted).is_err());
    assert_eq!(m.selected_candidate(), Some("事"));

    m.reset();
    assert_eq!(parser.cache_stats(), (0, 0));
}
