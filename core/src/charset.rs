// core/src/charset.rs
//
// Simplified <-> Traditional character conversion.
//
// Conversion is strictly one code point in, one code point out. Characters
// without a table entry pass through unchanged. The simplified → traditional
// table is injective and no character appears on both sides, so converting
// there and back restores any text made only of mapped characters.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::ImeError;

/// Output character repertoire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    Simplified,
    Traditional,
}

impl Charset {
    pub fn as_str(self) -> &'static str {
        match self {
            Charset::Simplified => "simplified",
            Charset::Traditional => "traditional",
        }
    }

    pub fn other(self) -> Charset {
        match self {
            Charset::Simplified => Charset::Traditional,
            Charset::Traditional => Charset::Simplified,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = ImeError;

    /// Accepts the full names plus the usual short forms (`s`, `t`, `zh-cn`,
    /// `zh-tw`, `hans`, `hant`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplified" | "s" | "zh-cn" | "zh-hans" | "hans" => Ok(Charset::Simplified),
            "traditional" | "t" | "zh-tw" | "zh-hant" | "hant" => Ok(Charset::Traditional),
            _ => Err(ImeError::UnknownCharset(s.to_string())),
        }
    }
}

static SIMPLIFIED_TO_TRADITIONAL: phf::Map<char, char> = phf_map! {
    '爱' => '愛', '罢' => '罷', '备' => '備', '贝' => '貝', '笔' => '筆', '边' => '邊',
    '变' => '變', '宾' => '賓', '长' => '長', '场' => '場', '车' => '車', '陈' => '陳',
    '称' => '稱', '诚' => '誠', '冲' => '衝', '虫' => '蟲', '处' => '處', '传' => '傳',
    '词' => '詞', '从' => '從', '错' => '錯', '达' => '達', '带' => '帶', '单' => '單',
    '当' => '當', '党' => '黨', '导' => '導', '灯' => '燈', '点' => '點', '电' => '電',
    '东' => '東', '动' => '動', '对' => '對', '队' => '隊', '吨' => '噸', '夺' => '奪',
    '儿' => '兒', '尔' => '爾', '发' => '發', '饭' => '飯', '访' => '訪', '飞' => '飛',
    '费' => '費', '丰' => '豐', '风' => '風', '凤' => '鳳', '妇' => '婦', '该' => '該',
    '刚' => '剛', '钢' => '鋼', '个' => '個', '给' => '給', '宫' => '宮', '贡' => '貢',
    '购' => '購', '关' => '關', '观' => '觀', '广' => '廣', '归' => '歸', '贵' => '貴',
    '国' => '國', '过' => '過', '还' => '還', '汉' => '漢', '号' => '號', '红' => '紅',
    '后' => '後', '护' => '護', '华' => '華', '画' => '畫', '话' => '話', '欢' => '歡',
    '环' => '環', '会' => '會', '汇' => '匯', '伙' => '夥', '货' => '貨', '机' => '機',
    '鸡' => '雞', '级' => '級', '际' => '際', '计' => '計', '记' => '記', '纪' => '紀',
    '济' => '濟', '价' => '價', '间' => '間', '简' => '簡', '见' => '見', '将' => '將',
    '讲' => '講', '奖' => '獎', '饺' => '餃', '脚' => '腳', '阶' => '階', '节' => '節',
    '结' => '結', '紧' => '緊', '进' => '進', '尽' => '盡', '经' => '經', '镜' => '鏡',
    '举' => '舉', '剧' => '劇', '觉' => '覺', '开' => '開', '课' => '課', '块' => '塊',
    '来' => '來', '蓝' => '藍', '乐' => '樂', '类' => '類', '离' => '離', '礼' => '禮',
    '丽' => '麗', '联' => '聯', '脸' => '臉', '练' => '練', '两' => '兩', '辆' => '輛',
    '疗' => '療', '邻' => '鄰', '领' => '領', '刘' => '劉', '龙' => '龍', '楼' => '樓',
    '录' => '錄', '陆' => '陸', '妈' => '媽', '马' => '馬', '吗' => '嗎', '买' => '買',
    '卖' => '賣', '满' => '滿', '们' => '們', '门' => '門', '梦' => '夢', '灭' => '滅',
    '鸣' => '鳴', '难' => '難', '脑' => '腦', '鸟' => '鳥', '宁' => '寧', '农' => '農',
    '欧' => '歐', '盘' => '盤', '齐' => '齊', '气' => '氣', '钱' => '錢', '桥' => '橋',
    '亲' => '親', '轻' => '輕', '请' => '請', '穷' => '窮', '区' => '區', '权' => '權',
    '让' => '讓', '热' => '熱', '认' => '認', '软' => '軟', '伞' => '傘', '杀' => '殺',
    '伤' => '傷', '绍' => '紹', '设' => '設', '师' => '師', '诗' => '詩', '时' => '時',
    '识' => '識', '实' => '實', '视' => '視', '试' => '試', '书' => '書', '树' => '樹',
    '双' => '雙', '谁' => '誰', '说' => '說', '丝' => '絲', '岁' => '歲', '孙' => '孫',
    '态' => '態', '谈' => '談', '汤' => '湯', '题' => '題', '体' => '體', '铁' => '鐵',
    '听' => '聽', '厅' => '廳', '图' => '圖', '团' => '團', '网' => '網', '为' => '為',
    '伟' => '偉', '卫' => '衛', '问' => '問', '无' => '無', '务' => '務', '雾' => '霧',
    '戏' => '戲', '细' => '細', '虾' => '蝦', '现' => '現', '线' => '線', '乡' => '鄉',
    '响' => '響', '写' => '寫', '谢' => '謝', '兴' => '興', '选' => '選', '学' => '學',
    '寻' => '尋', '压' => '壓', '鸭' => '鴨', '颜' => '顏', '样' => '樣', '药' => '藥',
    '爷' => '爺', '业' => '業', '页' => '頁', '医' => '醫', '亿' => '億', '忆' => '憶',
    '义' => '義', '艺' => '藝', '译' => '譯', '阴' => '陰', '银' => '銀', '应' => '應',
    '营' => '營', '拥' => '擁', '优' => '優', '邮' => '郵', '鱼' => '魚', '语' => '語',
    '园' => '園', '员' => '員', '远' => '遠', '愿' => '願', '约' => '約', '跃' => '躍',
    '云' => '雲', '运' => '運', '杂' => '雜', '灾' => '災', '这' => '這', '张' => '張',
    '账' => '賬', '阵' => '陣', '证' => '證', '钟' => '鐘', '种' => '種', '众' => '眾',
    '猪' => '豬', '专' => '專', '转' => '轉', '装' => '裝', '壮' => '壯', '准' => '準',
    '资' => '資', '总' => '總', '组' => '組', '钻' => '鑽', '讯' => '訊', '湾' => '灣',
    '仅' => '僅', '质' => '質', '舍' => '捨', '扫' => '掃',
};

static TRADITIONAL_TO_SIMPLIFIED: Lazy<HashMap<char, char>> = Lazy::new(|| {
    SIMPLIFIED_TO_TRADITIONAL
        .entries()
        .map(|(s, t)| (*t, *s))
        .collect()
});

/// Stateless converter over the built-in tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharsetConverter;

impl CharsetConverter {
    pub fn new() -> Self {
        CharsetConverter
    }

    /// Convert `text` from one charset to the other. Identity when
    /// `from == to`.
    pub fn convert(&self, text: &str, from: Charset, to: Charset) -> String {
        match (from, to) {
            (Charset::Simplified, Charset::Traditional) => to_traditional(text),
            (Charset::Traditional, Charset::Simplified) => to_simplified(text),
            _ => text.to_string(),
        }
    }

    /// Map a single character, or return it unchanged.
    pub fn convert_char(&self, ch: char, from: Charset, to: Charset) -> char {
        match (from, to) {
            (Charset::Simplified, Charset::Traditional) => {
                SIMPLIFIED_TO_TRADITIONAL.get(&ch).copied().unwrap_or(ch)
            }
            (Charset::Traditional, Charset::Simplified) => {
                TRADITIONAL_TO_SIMPLIFIED.get(&ch).copied().unwrap_or(ch)
            }
            _ => ch,
        }
    }
}

/// Simplified → Traditional.
pub fn to_traditional(text: &str) -> String {
    text.chars()
        .map(|c| SIMPLIFIED_TO_TRADITIONAL.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Traditional → Simplified.
pub fn to_simplified(text: &str) -> String {
    text.chars()
        .map(|c| TRADITIONAL_TO_SIMPLIFIED.get(&c).copied().unwrap_or(c))
        .collect()
}
