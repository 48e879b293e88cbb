//! hanzi-zhuyin crate root
//!
//! Zhuyin (bopomofo) input on top of `hanzi-core`.
//!
//! - `BopomofoMapper`: symbol table, validation and pinyin spelling
//! - `BopomofoScheme`: dictionary-backed `InputScheme` with lazy loading
//! - `fallback_dictionary`: built-in entries used when no file resolves

pub mod mapper;
pub mod scheme;

pub use mapper::{is_symbol, BopomofoMapper};
pub use scheme::{BopomofoScheme, DEFAULT_DICTIONARY, MAX_CANDIDATES};

use hanzi_core::Dictionary;

const FALLBACK_ENTRIES: &[(&str, &str, u32)] = &[
    ("ㄅㄚ", "八", 950),
    ("ㄅㄚ", "巴", 900),
    ("ㄅㄚ", "吧", 880),
    ("ㄅㄚ", "把", 870),
    ("ㄅㄚ", "爸", 860),
    ("ㄋㄧ", "你", 999),
    ("ㄋㄧ", "泥", 900),
    ("ㄏㄠ", "好", 999),
    ("ㄏㄠ", "號", 950),
    ("ㄓㄨㄥ", "中", 990),
    ("ㄓㄨㄥ", "鐘", 900),
    ("ㄓㄨㄥ", "種", 880),
    ("ㄍㄨㄛ", "國", 990),
    ("ㄍㄨㄛ", "過", 950),
    ("ㄕ", "是", 999),
    ("ㄕ", "十", 980),
    ("ㄕ", "時", 970),
    ("ㄨㄛ", "我", 999),
    ("ㄩㄢ", "元", 960),
    ("ㄩㄢ", "原", 950),
    ("ㄩㄢ", "遠", 940),
    ("ㄊㄧㄢ", "天", 999),
    ("ㄊㄧㄢ", "田", 960),
    ("ㄊㄧㄢ", "填", 900),
    ("ㄇㄣ", "們", 950),
    ("ㄇㄣ", "門", 940),
    ("ㄒㄧㄝ", "謝", 960),
    ("ㄒㄧㄝ", "寫", 950),
    ("ㄋㄧ ㄏㄠ", "你好", 1000),
    ("ㄒㄧㄝ ㄒㄧㄝ", "謝謝", 980),
    ("ㄓㄨㄥ ㄍㄨㄛ", "中國", 990),
    ("ㄐㄧㄣ ㄊㄧㄢ", "今天", 950),
    ("ㄊㄞ ㄨㄢ", "台灣", 970),
];

/// The built-in bopomofo entries as a dictionary.
pub fn fallback_dictionary() -> Dictionary {
    Dictionary::from_triples(FALLBACK_ENTRIES)
}
