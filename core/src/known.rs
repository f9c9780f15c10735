//! Words the learner already knows.
//!
//! The set is the union of every graded entry at or below the learner's
//! level and the learner's own saved-words list. It is built once at startup
//! and only read afterwards.

use ahash::AHashSet;
use tracing::{debug, warn};

use crate::lexicon::{DictionaryEntry, WordLookup};

#[derive(Debug, Clone, Default)]
pub struct KnownWordSet {
    words: AHashSet<String>,
}

impl KnownWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a graded word list and a saved-words list.
    pub fn build(graded: &[DictionaryEntry], level: u8, saved: &[DictionaryEntry]) -> Self {
        let mut set = Self::new();
        set.add_graded(graded, level);
        set.add_saved(saved);
        set
    }

    /// Add every entry whose level is at or below `level`.
    ///
    /// Entries without a level cannot be compared and are left out.
    pub fn add_graded(&mut self, entries: &[DictionaryEntry], level: u8) {
        let mut ungraded = 0usize;
        let before = self.words.len();
        for entry in entries {
            match entry.level {
                Some(l) if l <= level => {
                    self.words.insert(entry.word.clone());
                }
                Some(_) => {}
                None => ungraded += 1,
            }
        }
        if ungraded > 0 {
            warn!(count = ungraded, "graded word list has entries without a level");
        }
        debug!(level, added = self.words.len() - before, "added graded known words");
    }

    /// Add every saved word regardless of level.
    pub fn add_saved(&mut self, entries: &[DictionaryEntry]) {
        self.words
            .extend(entries.iter().map(|entry| entry.word.clone()));
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

impl WordLookup for KnownWordSet {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl<'a> FromIterator<&'a str> for KnownWordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_string).collect(),
        }
    }
}
