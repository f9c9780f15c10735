//! Enrichment pipeline: unknown words in, flashcard deck out.
//!
//! For each word, in order:
//! 1. the lexicon supplies pinyin and definition (no definition: dropped)
//! 2. the first local corpus sentence containing the word is the example
//! 3. otherwise the fallback dictionary is asked, spaced by a [`RateLimiter`]
//!
//! Entries left without an example are kept and listed in
//! [`Deck::incomplete`]. Nothing here aborts the batch.

use hanzi_vocab_core::{DictionaryEntry, LexiconIndex};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::corpus::{ExampleSentence, SentenceCorpus};
use crate::deck::{Deck, DeckEntry};
use crate::lookup::{FallbackLookup, LookupOutcome};
use crate::throttle::RateLimiter;
use crate::tone::decode_phrase;

pub struct Enricher<'a> {
    lexicon: &'a LexiconIndex,
    corpus: &'a SentenceCorpus,
    fallback: Option<Box<dyn FallbackLookup + 'a>>,
    limiter: RateLimiter,
    decode_pinyin: bool,
}

impl<'a> Enricher<'a> {
    /// Enricher with no fallback; lexicon pinyin is tone-mark decoded.
    pub fn new(lexicon: &'a LexiconIndex, corpus: &'a SentenceCorpus) -> Self {
        Self {
            lexicon,
            corpus,
            fallback: None,
            limiter: RateLimiter::new(Duration::ZERO),
            decode_pinyin: true,
        }
    }

    /// Ask `fallback` for words the corpus cannot illustrate, starting at
    /// most one lookup per `limiter` interval.
    pub fn with_fallback<F: FallbackLookup + 'a>(mut self, fallback: F, limiter: RateLimiter) -> Self {
        self.fallback = Some(Box::new(fallback));
        self.limiter = limiter;
        self
    }

    pub fn decode_pinyin(mut self, decode: bool) -> Self {
        self.decode_pinyin = decode;
        self
    }

    /// Enrich every word, preserving input order.
    pub fn enrich<S: AsRef<str>>(&mut self, words: &[S]) -> Deck {
        let mut deck = Deck::default();
        for word in words {
            let word = word.as_ref();
            let Some(entry) = self.lexicon.get(word) else {
                warn!(%word, "not in lexicon, dropping");
                deck.dropped.push(word.to_string());
                continue;
            };
            let Some(definition) = usable_definition(entry) else {
                warn!(%word, "lexicon entry has no definition, dropping");
                deck.dropped.push(word.to_string());
                continue;
            };

            let pinyin = self.render_pinyin(entry);
            let example = self.find_example(word);
            if example.is_none() {
                deck.incomplete.push(word.to_string());
            }
            deck.entries.push(DeckEntry {
                word: word.to_string(),
                pinyin,
                definition: definition.to_string(),
                example,
            });
        }

        info!(
            entries = deck.entries.len(),
            dropped = deck.dropped.len(),
            incomplete = deck.incomplete.len(),
            "enrichment finished"
        );
        deck
    }

    fn render_pinyin(&self, entry: &DictionaryEntry) -> String {
        match entry.pinyin.as_deref() {
            Some(p) if self.decode_pinyin => decode_phrase(p),
            Some(p) => p.to_string(),
            None => String::new(),
        }
    }

    fn find_example(&mut self, word: &str) -> Option<ExampleSentence> {
        if let Some(hit) = self.corpus.find_containing(word) {
            debug!(%word, "example from local corpus");
            return Some(hit.clone());
        }

        let fallback = self.fallback.as_mut()?;
        self.limiter.wait();
        match fallback.lookup(word) {
            LookupOutcome::Found(record) if !record.example.sentence.is_empty() => {
                debug!(%word, "example from fallback dictionary");
                Some(record.example)
            }
            LookupOutcome::Found(_) => {
                warn!(%word, "fallback page has an empty example");
                None
            }
            LookupOutcome::NotFound(reason) => {
                warn!(%word, %reason, "no example available");
                None
            }
            LookupOutcome::Failed(reason) => {
                warn!(%word, %reason, "fallback lookup failed");
                None
            }
        }
    }
}

fn usable_definition(entry: &DictionaryEntry) -> Option<&str> {
    entry
        .definition
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
}
