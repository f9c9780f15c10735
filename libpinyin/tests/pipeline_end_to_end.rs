// Whole pipeline from files on disk to a written deck, with a scripted
// fallback dictionary standing in for the website.

use hanzi_vocab::{
    load_entries, segment_words, unknown_words, Enricher, ExampleSentence, ExportFormat,
    FallbackLookup, KnownWordSet, LexiconIndex, LookupOutcome, RateLimiter, RemoteRecord,
    SentenceCorpus, VocabConfig,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

const CEDICT: &str = r#"[
    {"simplified": "我", "pinyin": "wo3", "english": ["I", "me"]},
    {"simplified": "喜", "pinyin": "xi3", "english": ["happy"]},
    {"simplified": "喜欢", "pinyin": "xi3 huan5", "english": ["to like"]},
    {"simplified": "听", "pinyin": "ting1", "english": ["to listen"]},
    {"simplified": "流", "pinyin": "liu2", "english": ["to flow"]},
    {"simplified": "流行", "pinyin": "liu2 xing2", "english": ["popular", "fashionable"]},
    {"simplified": "行", "pinyin": "xing2", "english": ["OK"]},
    {"simplified": "音", "pinyin": "yin1", "english": ["sound"]},
    {"simplified": "音乐", "pinyin": "yin1 yue4", "english": ["music"]},
    {"simplified": "乐", "pinyin": "le4", "english": ["happy"]},
    {"simplified": "呀", "pinyin": "ya5"}
]"#;

const HSK: &str = r#"[
    {"hanzi": "我", "HSK": "1"},
    {"hanzi": "喜欢", "HSK": "1"},
    {"hanzi": "听", "HSK": "1"},
    {"hanzi": "音乐", "HSK": "3"}
]"#;

const SENTENCES: &str = "音乐会几点开始？\tyīnyuèhuì jǐ diǎn kāishǐ?\tWhen does the concert start?\n";

struct ScriptedLookup {
    calls: Vec<String>,
}

impl FallbackLookup for ScriptedLookup {
    fn lookup(&mut self, word: &str) -> LookupOutcome {
        self.calls.push(word.to_string());
        match word {
            "流行" => LookupOutcome::Found(RemoteRecord {
                word: word.to_string(),
                pinyin: "liúxíng".into(),
                definition: "popular".into(),
                example: ExampleSentence::new(
                    "我喜欢听流行音乐。",
                    "wǒxǐhuān tīng liúxíng yīnyuè",
                    "I like listening to pop music.",
                ),
            }),
            _ => LookupOutcome::Failed("connection refused".into()),
        }
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn text_to_tsv_deck() {
    let dir = TempDir::new().unwrap();
    let mut config = VocabConfig::default();
    config.paths.lexicon = write(&dir, "cedict.json", CEDICT);
    config.paths.hsk = write(&dir, "hsk.json", HSK);
    config.paths.sentences = write(&dir, "sentences.tsv", SENTENCES);
    config.paths.output = dir.path().join("deck").join("deck.tsv");

    let (lexicon_entries, report) =
        load_entries(&config.paths.lexicon, &config.base().lexicon_fields).unwrap();
    assert_eq!(report.skipped, 0);
    let lexicon = LexiconIndex::from_entries(lexicon_entries);

    let (graded, _) = load_entries(&config.paths.hsk, &config.base().known_fields).unwrap();
    let known = KnownWordSet::build(&graded, 1, &[]);
    let corpus = SentenceCorpus::load(&config.paths.sentences).unwrap();

    let words = segment_words("我喜欢听流行音乐呀！", &lexicon);
    assert_eq!(words, vec!["我", "喜欢", "听", "流行", "音乐", "呀"]);
    let unknown = unknown_words(&words, &known);
    assert_eq!(unknown, vec!["流行", "音乐", "呀"]);

    let mut fallback = ScriptedLookup { calls: Vec::new() };
    let deck = Enricher::new(&lexicon, &corpus)
        .with_fallback(&mut fallback, RateLimiter::new(Duration::ZERO))
        .enrich(&unknown);

    // 音乐 comes from the local corpus, 呀 has no definition
    assert_eq!(fallback.calls, vec!["流行"]);
    assert_eq!(deck.dropped, vec!["呀"]);
    assert!(deck.incomplete.is_empty());

    let written = deck.save(&config.paths.output, &config.export).unwrap();
    assert_eq!(written, 2);

    let tsv = fs::read_to_string(&config.paths.output).unwrap();
    let rows: Vec<Vec<&str>> = tsv.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(
        rows[0],
        vec![
            "流行",
            "liú xíng",
            "popular; fashionable",
            "我喜欢听流行音乐。",
            "wǒxǐhuān tīng liúxíng yīnyuè",
            "I like listening to pop music.",
            ""
        ]
    );
    assert_eq!(rows[1][0], "音乐");
    assert_eq!(rows[1][1], "yīn yuè");
    assert_eq!(rows[1][3], "音乐会几点开始？");
}

#[test]
fn failed_lookups_are_exported_as_incomplete_json() {
    let lexicon = LexiconIndex::from_entries(vec![hanzi_vocab::DictionaryEntry::new("熊猫")
        .with_pinyin("xiong2 mao1")
        .with_definition("panda")]);
    let corpus = SentenceCorpus::new();
    let mut fallback = ScriptedLookup { calls: Vec::new() };

    let deck = Enricher::new(&lexicon, &corpus)
        .with_fallback(&mut fallback, RateLimiter::new(Duration::ZERO))
        .enrich(&["熊猫"]);
    assert_eq!(deck.incomplete, vec!["熊猫"]);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deck.json");
    let mut config = VocabConfig::default();
    config.export.format = ExportFormat::Json;
    assert_eq!(deck.save(&path, &config.export).unwrap(), 1);

    config.export.include_incomplete = false;
    assert_eq!(deck.save(&path, &config.export).unwrap(), 0);
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!([]));
}
