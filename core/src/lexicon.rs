//! Dictionary entries and the indexes built from them.
//!
//! Dictionaries arrive as JSON arrays of flat records (the HSK word list, the
//! saved-words list and the CE-DICT dump all share this shape). Which record
//! attribute holds the written word, the level, the pinyin and the definition
//! is described by [`FieldNames`], so one loader serves every file.
//!
//! Two indexes are built from the parsed entries:
//! - [`PresenceIndex`]: membership only, used by the segmenter.
//! - [`LexiconIndex`]: the full entry per written word, used for enrichment.
//!   Homographs collapse to the last entry seen.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, VocabError};
use crate::utils::normalize;

/// Names of the record attributes read from a dictionary file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldNames {
    /// Attribute holding the written word (the index key)
    pub word: String,
    /// Attribute holding the proficiency level
    pub level: String,
    /// Attribute holding the numeric-tone pinyin
    pub pinyin: String,
    /// Attribute holding the definition (string or array of strings)
    pub definition: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            word: "hanzi".to_string(),
            level: "HSK".to_string(),
            pinyin: "pinyin".to_string(),
            definition: "english".to_string(),
        }
    }
}

impl FieldNames {
    /// Same attribute names with a different word key (CE-DICT uses `simplified`).
    pub fn with_word_key(mut self, key: &str) -> Self {
        self.word = key.to_string();
        self
    }
}

/// One dictionary record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub level: Option<u8>,
    pub pinyin: Option<String>,
    pub definition: Option<String>,
}

impl DictionaryEntry {
    pub fn new<S: Into<String>>(word: S) -> Self {
        Self {
            word: word.into(),
            level: None,
            pinyin: None,
            definition: None,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_pinyin<S: Into<String>>(mut self, pinyin: S) -> Self {
        self.pinyin = Some(pinyin.into());
        self
    }

    pub fn with_definition<S: Into<String>>(mut self, definition: S) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Build an entry from a JSON record.
    ///
    /// Returns `None` when the record is not an object or its word attribute
    /// is missing, empty or not a string. The other attributes are optional.
    pub fn from_record(record: &Value, fields: &FieldNames) -> Option<Self> {
        let obj = record.as_object()?;
        let word = normalize(obj.get(&fields.word)?.as_str()?);
        if word.is_empty() {
            return None;
        }

        let level = obj.get(&fields.level).and_then(level_value);
        let pinyin = obj
            .get(&fields.pinyin)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let definition = obj.get(&fields.definition).and_then(definition_value);

        Some(Self {
            word,
            level,
            pinyin,
            definition,
        })
    }
}

/// Levels appear both as numbers (`3`) and numeric strings (`"3"`).
fn level_value(v: &Value) -> Option<u8> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Definitions appear as a single string or as a list of senses.
fn definition_value(v: &Value) -> Option<String> {
    let text = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Counts reported after parsing a dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Parse dictionary JSON text into raw records.
///
/// `source` only names the input in error messages.
pub fn parse_records(content: &str, source: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(content).map_err(|e| VocabError::Json {
        path: source.into(),
        source: e,
    })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(VocabError::NotAnArray(source.to_string())),
    }
}

/// Convert raw records into entries, skipping (and logging) the ones whose
/// word attribute is missing.
pub fn parse_entries(records: &[Value], fields: &FieldNames) -> (Vec<DictionaryEntry>, LoadReport) {
    let mut entries = Vec::with_capacity(records.len());
    let mut report = LoadReport::default();

    for (i, record) in records.iter().enumerate() {
        match DictionaryEntry::from_record(record, fields) {
            Some(entry) => {
                entries.push(entry);
                report.loaded += 1;
            }
            None => {
                warn!(
                    record = i,
                    key = %fields.word,
                    "skipping dictionary record without a usable key attribute"
                );
                report.skipped += 1;
            }
        }
    }

    (entries, report)
}

/// Read and parse a dictionary file.
pub fn load_entries<P: AsRef<Path>>(
    path: P,
    fields: &FieldNames,
) -> Result<(Vec<DictionaryEntry>, LoadReport)> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| VocabError::io(path, e))?;
    let records = parse_records(&content, &path.display().to_string())?;
    let (entries, report) = parse_entries(&records, fields);
    debug!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "loaded dictionary"
    );
    Ok((entries, report))
}

/// Membership test used by the segmenter.
pub trait WordLookup {
    fn contains(&self, word: &str) -> bool;
}

/// Written-word membership index. Duplicate keys collapse.
#[derive(Debug, Clone, Default)]
pub struct PresenceIndex {
    words: AHashSet<String>,
}

impl PresenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[DictionaryEntry]) -> Self {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    pub fn insert<S: Into<String>>(&mut self, word: S) {
        self.words.insert(word.into());
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PresenceIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl WordLookup for PresenceIndex {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Written word to full entry. The last entry for a homograph wins.
#[derive(Debug, Clone, Default)]
pub struct LexiconIndex {
    entries: AHashMap<String, DictionaryEntry>,
}

impl LexiconIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I: IntoIterator<Item = DictionaryEntry>>(entries: I) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    /// Insert an entry, replacing any earlier entry with the same word.
    pub fn insert(&mut self, entry: DictionaryEntry) {
        if let Some(prev) = self.entries.insert(entry.word.clone(), entry) {
            debug!(word = %prev.word, "homograph replaced by later entry");
        }
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }
}

impl WordLookup for LexiconIndex {
    fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cedict_fields() -> FieldNames {
        FieldNames::default().with_word_key("simplified")
    }

    #[test]
    fn test_from_record_reads_all_attributes() {
        let record = json!({
            "simplified": "你好",
            "pinyin": "ni3 hao3",
            "english": ["hello", "hi"],
            "HSK": 1
        });
        let entry = DictionaryEntry::from_record(&record, &cedict_fields()).unwrap();
        assert_eq!(entry.word, "你好");
        assert_eq!(entry.pinyin.as_deref(), Some("ni3 hao3"));
        assert_eq!(entry.definition.as_deref(), Some("hello; hi"));
        assert_eq!(entry.level, Some(1));
    }

    #[test]
    fn test_level_as_string() {
        let record = json!({"hanzi": "学习", "HSK": "2"});
        let entry = DictionaryEntry::from_record(&record, &FieldNames::default()).unwrap();
        assert_eq!(entry.level, Some(2));
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let fields = FieldNames::default();
        assert!(DictionaryEntry::from_record(&json!({"HSK": 1}), &fields).is_none());
        assert!(DictionaryEntry::from_record(&json!({"hanzi": ""}), &fields).is_none());
        assert!(DictionaryEntry::from_record(&json!({"hanzi": 5}), &fields).is_none());
        assert!(DictionaryEntry::from_record(&json!("你好"), &fields).is_none());
    }

    #[test]
    fn test_parse_entries_skips_and_counts() {
        let records = parse_records(
            r#"[{"hanzi":"你"},{"level":1},{"hanzi":"好"},{"hanzi":null}]"#,
            "inline",
        )
        .unwrap();
        let (entries, report) = parse_entries(&records, &FieldNames::default());
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["你", "好"]);
        assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
    }

    #[test]
    fn test_parse_records_requires_array() {
        let err = parse_records(r#"{"hanzi":"你"}"#, "inline").unwrap_err();
        assert!(matches!(err, VocabError::NotAnArray(_)));
        let err = parse_records("[", "inline").unwrap_err();
        assert!(matches!(err, VocabError::Json { .. }));
    }

    #[test]
    fn test_presence_index_collapses_duplicates() {
        let entries = vec![
            DictionaryEntry::new("只"),
            DictionaryEntry::new("只"),
            DictionaryEntry::new("一只"),
        ];
        let index = PresenceIndex::from_entries(&entries);
        assert_eq!(index.len(), 2);
        assert!(index.contains("只"));
        assert!(!index.contains("两只"));
    }

    #[test]
    fn test_lexicon_index_last_homograph_wins() {
        let index = LexiconIndex::from_entries(vec![
            DictionaryEntry::new("只").with_pinyin("zhi1").with_definition("measure word"),
            DictionaryEntry::new("只").with_pinyin("zhi3").with_definition("only"),
        ]);
        assert_eq!(index.len(), 1);
        let entry = index.get("只").unwrap();
        assert_eq!(entry.pinyin.as_deref(), Some("zhi3"));
        assert_eq!(entry.definition.as_deref(), Some("only"));
    }
}
