// libzhuyin/src/mapper.rs
//
// Bopomofo (zhuyin) symbol table and conversion to pinyin spelling.
//
// Each symbol maps to its pinyin letters; the four tone marks map to the tone
// digit (first tone is unmarked). A handful of two-symbol finals spell
// differently from their parts and are matched before the single-symbol
// table: ㄧㄢ → ian, ㄨㄢ → uan, ㄩㄢ → uan.

use phf::phf_map;

static SYMBOLS: phf::Map<char, &'static str> = phf_map! {
    // initials
    'ㄅ' => "b", 'ㄆ' => "p", 'ㄇ' => "m", 'ㄈ' => "f",
    'ㄉ' => "d", 'ㄊ' => "t", 'ㄋ' => "n", 'ㄌ' => "l",
    'ㄍ' => "g", 'ㄎ' => "k", 'ㄏ' => "h",
    'ㄐ' => "j", 'ㄑ' => "q", 'ㄒ' => "x",
    'ㄓ' => "zh", 'ㄔ' => "ch", 'ㄕ' => "sh", 'ㄖ' => "r",
    'ㄗ' => "z", 'ㄘ' => "c", 'ㄙ' => "s",
    // medials
    'ㄧ' => "i", 'ㄨ' => "u", 'ㄩ' => "v",
    // finals
    'ㄚ' => "a", 'ㄛ' => "o", 'ㄜ' => "e", 'ㄝ' => "e",
    'ㄞ' => "ai", 'ㄟ' => "ei", 'ㄠ' => "ao", 'ㄡ' => "ou",
    'ㄢ' => "an", 'ㄣ' => "en", 'ㄤ' => "ang", 'ㄥ' => "eng",
    'ㄦ' => "er",
    // tones
    'ˊ' => "2", 'ˇ' => "3", 'ˋ' => "4", '˙' => "5",
};

static PAIR_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "ㄧㄢ" => "ian",
    "ㄨㄢ" => "uan",
    "ㄩㄢ" => "uan",
};

/// Whether `ch` is a bopomofo symbol or tone mark known to the table.
pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains_key(&ch)
}

/// Stateless bopomofo → pinyin translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BopomofoMapper;

impl BopomofoMapper {
    pub fn new() -> Self {
        BopomofoMapper
    }

    /// True iff at least one non-space character is a known symbol.
    pub fn is_valid(&self, input: &str) -> bool {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .any(is_symbol)
    }

    /// The input with all whitespace removed. Used as the no-space key when
    /// matching dictionary keys that were written with separators.
    pub fn parse(&self, input: &str) -> String {
        input.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Translate symbol by symbol. Unknown characters pass through as-is.
    pub fn to_pinyin(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len());
        let mut i = 0;
        while i < chars.len() {
            if let Some(next) = chars.get(i + 1) {
                let mut pair = String::with_capacity(8);
                pair.push(chars[i]);
                pair.push(*next);
                if let Some(spelled) = PAIR_OVERRIDES.get(pair.as_str()) {
                    out.push_str(spelled);
                    i += 2;
                    continue;
                }
            }
            match SYMBOLS.get(&chars[i]) {
                Some(spelled) => out.push_str(spelled),
                None => out.push(chars[i]),
            }
            i += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_symbols() {
        let m = BopomofoMapper::new();
        assert_eq!(m.to_pinyin("ㄅㄚ"), "ba");
        assert_eq!(m.to_pinyin("ㄓㄨㄥ"), "zhueng");
        assert_eq!(m.to_pinyin("ㄋㄧˇ"), "ni3");
        assert_eq!(m.to_pinyin("ㄇㄚ˙"), "ma5");
    }

    #[test]
    fn pair_overrides() {
        let m = BopomofoMapper::new();
        assert_eq!(m.to_pinyin("ㄧㄢ"), "ian");
        assert_eq!(m.to_pinyin("ㄨㄢ"), "uan");
        assert_eq!(m.to_pinyin("ㄩㄢ"), "uan");
        assert_eq!(m.to_pinyin("ㄊㄧㄢ"), "tian");
    }

    #[test]
    fn unknown_passes_through() {
        let m = BopomofoMapper::new();
        assert_eq!(m.to_pinyin("ㄋㄧ ㄏㄠ!"), "ni hao!");
        assert_eq!(m.to_pinyin(""), "");
    }

    #[test]
    fn validity() {
        let m = BopomofoMapper::new();
        assert!(m.is_valid(" ㄅ "));
        assert!(m.is_valid("abcˇ"));
        assert!(!m.is_valid("   "));
        assert!(!m.is_valid("nihao"));
        assert!(!m.is_valid(""));
    }

    #[test]
    fn parse_strips_spaces_only() {
        let m = BopomofoMapper::new();
        assert_eq!(m.parse(" ㄋㄧ  ㄏㄠ "), "ㄋㄧㄏㄠ");
        assert_eq!(m.parse("ㄋㄧˇ"), "ㄋㄧˇ");
    }
}
