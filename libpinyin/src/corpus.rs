//! Local example-sentence corpus.
//!
//! The corpus is a TSV file with one example per line:
//! `sentence<TAB>pinyin<TAB>translation`. Lookups return the first sentence
//! in file order that contains the word; there is no ranking.

use hanzi_vocab_core::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// An example sentence with its pronunciation and translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub sentence: String,
    pub pinyin: String,
    pub translation: String,
}

impl ExampleSentence {
    pub fn new<S: Into<String>>(sentence: S, pinyin: S, translation: S) -> Self {
        Self {
            sentence: sentence.into(),
            pinyin: pinyin.into(),
            translation: translation.into(),
        }
    }
}

fn parse_tsv_line(line: &str) -> Option<ExampleSentence> {
    // expected: sentence\tpinyin\ttranslation
    let mut parts = line.split('\t');
    let sentence = parts.next()?.trim();
    let pinyin = parts.next()?.trim();
    let translation = parts.next()?.trim();
    if sentence.is_empty() {
        return None;
    }
    Some(ExampleSentence::new(sentence, pinyin, translation))
}

#[derive(Debug, Clone, Default)]
pub struct SentenceCorpus {
    sentences: Vec<ExampleSentence>,
}

impl SentenceCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TSV text. Blank lines are ignored; lines missing a field are
    /// skipped with a warning.
    pub fn from_tsv_str(content: &str) -> Self {
        let mut sentences = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            match parse_tsv_line(line) {
                Some(s) => sentences.push(s),
                None => warn!(line = lineno + 1, "skipping malformed corpus line"),
            }
        }
        Self { sentences }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| VocabError::io(path, e))?;
        let corpus = Self::from_tsv_str(&content);
        debug!(path = %path.display(), sentences = corpus.len(), "loaded sentence corpus");
        Ok(corpus)
    }

    pub fn push(&mut self, sentence: ExampleSentence) {
        self.sentences.push(sentence);
    }

    /// First sentence containing `word` as a substring.
    pub fn find_containing(&self, word: &str) -> Option<&ExampleSentence> {
        if word.is_empty() {
            return None;
        }
        self.sentences.iter().find(|s| s.sentence.contains(word))
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
