// hanzi-vocab/libpinyin/src/tone.rs
//
// Numeric-tone pinyin to tone-marked pinyin.
//
// Dictionaries and the remote dictionary site write pinyin with a trailing
// tone digit ("ni3", "lv4", "ma5"). Flashcards want the diacritic form
// ("nǐ", "lǜ", "ma"). Mark placement follows the usual rule:
// - "a" or "e" takes the mark when present
// - in "ou" the "o" takes it
// - otherwise the last vowel does
//
// "v" and "u:" are the ASCII spellings of "ü".

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

/// Tone 1-4 forms of every vowel that can carry a mark.
static TONE_MARKS: phf::Map<char, [char; 4]> = phf_map! {
    'a' => ['ā', 'á', 'ǎ', 'à'],
    'e' => ['ē', 'é', 'ě', 'è'],
    'i' => ['ī', 'í', 'ǐ', 'ì'],
    'o' => ['ō', 'ó', 'ǒ', 'ò'],
    'u' => ['ū', 'ú', 'ǔ', 'ù'],
    'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
    'A' => ['Ā', 'Á', 'Ǎ', 'À'],
    'E' => ['Ē', 'É', 'Ě', 'È'],
    'I' => ['Ī', 'Í', 'Ǐ', 'Ì'],
    'O' => ['Ō', 'Ó', 'Ǒ', 'Ò'],
    'U' => ['Ū', 'Ú', 'Ǔ', 'Ù'],
    'Ü' => ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ'],
};

/// One syllable inside a run such as "wo3xi3huan1": letters up to and
/// including an optional tone digit.
static SYLLABLE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]*[0-9]?").unwrap());

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') || c == 'ü' || c == 'Ü'
}

fn umlaut(base: &str) -> String {
    base.replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

/// Index of the vowel that carries the tone mark.
fn mark_position(chars: &[char]) -> Option<usize> {
    let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
    if let Some(i) = lower.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(i);
    }
    if let Some(i) = lower.windows(2).position(|w| w[0] == 'o' && w[1] == 'u') {
        return Some(i);
    }
    chars.iter().rposition(|&c| is_vowel(c))
}

/// Decode a single numeric-tone syllable.
///
/// Input without a trailing tone digit is returned unchanged. Tones 0 and 5
/// are neutral and simply drop the digit. A digit above 5 or a toned
/// syllable without a vowel is malformed and also returned unchanged.
///
/// # Examples
/// ```
/// use hanzi_vocab::tone::decode_syllable;
///
/// assert_eq!(decode_syllable("ni3"), "nǐ");
/// assert_eq!(decode_syllable("hao3"), "hǎo");
/// assert_eq!(decode_syllable("liu2"), "liú");
/// assert_eq!(decode_syllable("lv4"), "lǜ");
/// assert_eq!(decode_syllable("ma"), "ma");
/// ```
pub fn decode_syllable(syllable: &str) -> String {
    let Some(last) = syllable.chars().last() else {
        return String::new();
    };
    let Some(tone) = last.to_digit(10) else {
        return syllable.to_string();
    };
    let base = &syllable[..syllable.len() - 1];
    if base.is_empty() || tone > 5 {
        return syllable.to_string();
    }

    let base = umlaut(base);
    if tone == 0 || tone == 5 {
        return base;
    }

    let mut chars: Vec<char> = base.chars().collect();
    let Some(pos) = mark_position(&chars) else {
        return syllable.to_string();
    };
    match TONE_MARKS.get(&chars[pos]) {
        Some(forms) => {
            chars[pos] = forms[tone as usize - 1];
            chars.into_iter().collect()
        }
        None => syllable.to_string(),
    }
}

/// Decode one written word whose syllables run together ("wo3xi3huan1").
///
/// The decoded syllables are concatenated, giving "wǒxǐhuān".
pub fn decode_word(word: &str) -> String {
    SYLLABLE_RUN
        .find_iter(word)
        .map(|m| decode_syllable(m.as_str()))
        .collect()
}

/// Decode a whitespace-separated phrase, one word at a time.
///
/// # Examples
/// ```
/// use hanzi_vocab::tone::decode_phrase;
///
/// assert_eq!(decode_phrase("ni3 hao3"), "nǐ hǎo");
/// assert_eq!(decode_phrase("Zhong1guo2  ren2"), "Zhōngguó rén");
/// ```
pub fn decode_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(decode_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the pinyin field of a remote dictionary page.
///
/// The site writes syllables separated by spaces and words separated by
/// `||`, with empty words for punctuation:
/// `"wo3 xi3 huan1||ting1||liu2 xing2||yin1 yue4|| ||||"`.
pub fn decode_remote_pinyin(raw: &str) -> String {
    let words = raw.replace(' ', "").replace("||", " ");
    decode_phrase(&words)
}
