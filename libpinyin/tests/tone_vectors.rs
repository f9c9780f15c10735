// Tone-mark rendering checked against dictionary-style input.

use hanzi_vocab::{decode_phrase, decode_remote_pinyin, decode_syllable};

#[test]
fn cedict_pinyin_vectors() {
    let cases = [
        ("ni3 hao3", "nǐ hǎo"),
        ("xi3 huan5", "xǐ huan"),
        ("liu2 xing2", "liú xíng"),
        ("yin1 yue4", "yīn yuè"),
        ("lu:4 shi1", "lǜ shī"),
        ("nu:3 er2", "nǚ ér"),
        ("Zhong1 guo2", "Zhōng guó"),
        ("xiang1 gang3", "xiāng gǎng"),
        ("kuai4 le4", "kuài lè"),
        ("dou1", "dōu"),
    ];
    for (input, expected) in cases {
        assert_eq!(decode_phrase(input), expected, "decoding {:?}", input);
    }
}

#[test]
fn neutral_and_untoned_syllables() {
    assert_eq!(decode_syllable("de5"), "de");
    assert_eq!(decode_syllable("le0"), "le");
    assert_eq!(decode_syllable("zhe"), "zhe");
    assert_eq!(decode_phrase("ma5"), "ma");
}

#[test]
fn malformed_input_passes_through() {
    assert_eq!(decode_syllable("hm9"), "hm9");
    assert_eq!(decode_syllable("ng2"), "ng2");
    assert_eq!(decode_phrase("OK"), "OK");
    assert_eq!(decode_phrase(""), "");
}

#[test]
fn remote_sentence_pinyin() {
    assert_eq!(
        decode_remote_pinyin("ta1||shi4||lao3 shi1||。||"),
        "tā shì lǎoshī 。"
    );
}
