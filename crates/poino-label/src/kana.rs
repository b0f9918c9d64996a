//! Romaji phoneme to katakana conversion.

/// Ordered substitution table.
///
/// Three-letter clusters come before two-letter syllables, which come before
/// bare vowels, so that e.g. `kya` is never split into `k` + `ya`.
pub const ROMAJI_TO_KANA: &[(&str, &str)] = &[
    ("pau", "、"),
    ("kya", "キャ"),
    ("kyu", "キュ"),
    ("kye", "キェ"),
    ("kyo", "キョ"),
    ("gya", "ギャ"),
    ("gyu", "ギュ"),
    ("gye", "ギェ"),
    ("gyo", "ギョ"),
    ("kwa", "クヮ"),
    ("gwa", "グヮ"),
    ("sha", "シャ"),
    ("shi", "シ"),
    ("shu", "シュ"),
    ("she", "シェ"),
    ("sho", "ショ"),
    ("cha", "チャ"),
    ("chi", "チ"),
    ("chu", "チュ"),
    ("che", "チェ"),
    ("cho", "チョ"),
    ("tsa", "ツァ"),
    ("tsi", "ツィ"),
    ("tsu", "ツ"),
    ("tse", "ツェ"),
    ("tso", "ツォ"),
    ("tya", "テャ"),
    ("tyu", "テュ"),
    ("tyo", "テョ"),
    ("dya", "デャ"),
    ("dyu", "デュ"),
    ("dyo", "デョ"),
    ("nya", "ニャ"),
    ("nyu", "ニュ"),
    ("nye", "ニェ"),
    ("nyo", "ニョ"),
    ("hya", "ヒャ"),
    ("hyu", "ヒュ"),
    ("hye", "ヒェ"),
    ("hyo", "ヒョ"),
    ("bya", "ビャ"),
    ("byu", "ビュ"),
    ("bye", "ビェ"),
    ("byo", "ビョ"),
    ("pya", "ピャ"),
    ("pyu", "ピュ"),
    ("pye", "ピェ"),
    ("pyo", "ピョ"),
    ("mya", "ミャ"),
    ("myu", "ミュ"),
    ("mye", "ミェ"),
    ("myo", "ミョ"),
    ("rya", "リャ"),
    ("ryu", "リュ"),
    ("rye", "リェ"),
    ("ryo", "リョ"),
    ("cl", "ッ"),
    ("ye", "イェ"),
    ("ka", "カ"),
    ("ki", "キ"),
    ("ku", "ク"),
    ("ke", "ケ"),
    ("ko", "コ"),
    ("sa", "サ"),
    ("si", "スィ"),
    ("su", "ス"),
    ("se", "セ"),
    ("so", "ソ"),
    ("ta", "タ"),
    ("ti", "ティ"),
    ("tu", "トゥ"),
    ("te", "テ"),
    ("to", "ト"),
    ("na", "ナ"),
    ("ni", "ニ"),
    ("nu", "ヌ"),
    ("ne", "ネ"),
    ("no", "ノ"),
    ("ha", "ハ"),
    ("hi", "ヒ"),
    ("he", "ヘ"),
    ("ho", "ホ"),
    ("ma", "マ"),
    ("mi", "ミ"),
    ("mu", "ム"),
    ("me", "メ"),
    ("mo", "モ"),
    ("ya", "ヤ"),
    ("yu", "ユ"),
    ("yo", "ヨ"),
    ("ra", "ラ"),
    ("ri", "リ"),
    ("ru", "ル"),
    ("re", "レ"),
    ("ro", "ロ"),
    ("wa", "ワ"),
    ("wi", "ウィ"),
    ("we", "ウェ"),
    ("wo", "ウォ"),
    ("fa", "ファ"),
    ("fi", "フィ"),
    ("fu", "フ"),
    ("fe", "フェ"),
    ("fo", "フォ"),
    ("va", "ヴァ"),
    ("vi", "ヴィ"),
    ("vu", "ヴ"),
    ("ve", "ヴェ"),
    ("vo", "ヴォ"),
    ("ga", "ガ"),
    ("gi", "ギ"),
    ("gu", "グ"),
    ("ge", "ゲ"),
    ("go", "ゴ"),
    ("za", "ザ"),
    ("zi", "ズィ"),
    ("zu", "ズ"),
    ("ze", "ゼ"),
    ("zo", "ゾ"),
    ("ja", "ジャ"),
    ("ji", "ジ"),
    ("ju", "ジュ"),
    ("je", "ジェ"),
    ("jo", "ジョ"),
    ("da", "ダ"),
    ("di", "ディ"),
    ("du", "ドゥ"),
    ("de", "デ"),
    ("do", "ド"),
    ("ba", "バ"),
    ("bi", "ビ"),
    ("bu", "ブ"),
    ("be", "ベ"),
    ("bo", "ボ"),
    ("pa", "パ"),
    ("pi", "ピ"),
    ("pu", "プ"),
    ("pe", "ペ"),
    ("po", "ポ"),
    ("a", "ア"),
    ("i", "イ"),
    ("u", "ウ"),
    ("e", "エ"),
    ("o", "オ"),
    ("N", "ン"),
    (CONTINUATION_MARK, LONG_VOWEL_MARK),
];

/// Symbol that replaces an immediately repeated phoneme inside a group.
pub const CONTINUATION_MARK: &str = "^";

/// Katakana long vowel mark.
pub const LONG_VOWEL_MARK: &str = "ー";

/// Converts a concatenated phoneme string to katakana.
///
/// Each table entry is applied in order to the whole string, matching ASCII
/// case-insensitively (devoiced vowels arrive upper-case). Any ASCII letters
/// left afterwards have no kana and are dropped.
pub fn romaji_to_kana(romaji: &str) -> String {
    let replaced = ROMAJI_TO_KANA
        .iter()
        .fold(romaji.to_string(), |text, (pattern, kana)| {
            replace_ascii_case_insensitive(&text, pattern, kana)
        });

    replaced
        .chars()
        .filter(|c| !c.is_ascii_alphabetic())
        .collect()
}

fn replace_ascii_case_insensitive(text: &str, pattern: &str, replacement: &str) -> String {
    let pattern = pattern.as_bytes();
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut pos = 0;

    while let Some(c) = rest.chars().next() {
        let candidate = &bytes[pos..];
        if candidate.len() >= pattern.len()
            && candidate[..pattern.len()].eq_ignore_ascii_case(pattern)
        {
            out.push_str(replacement);
            pos += pattern.len();
        } else {
            out.push(c);
            pos += c.len_utf8();
        }
        rest = &text[pos..];
    }

    out
}

/// Converts hiragana to katakana, leaving other characters untouched.
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Keeps only characters from the katakana block (including `ー`).
pub fn katakana_only(text: &str) -> String {
    text.chars()
        .filter(|c| ('\u{30A1}'..='\u{30FC}').contains(c))
        .collect()
}
