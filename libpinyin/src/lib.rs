//! hanzi-vocab crate root
//!
//! This crate provides the pinyin-specific half of the vocabulary pipeline:
//! tone-mark rendering, the example-sentence corpus, the rate-limited
//! fallback dictionary, enrichment into a flashcard deck and the deck
//! export. Segmentation and filtering come from `hanzi-vocab-core`.
//!
//! Public API exported here:
//! - `decode_syllable`, `decode_word`, `decode_phrase`, `decode_remote_pinyin` from `tone`
//! - `ExampleSentence`, `SentenceCorpus` from `corpus`
//! - `RemoteDictionary`, `RemoteRecord`, `FallbackLookup`, `LookupOutcome`,
//!   `parse_details_page` from `lookup`
//! - `RateLimiter` from `throttle`
//! - `Enricher` from `enrich`
//! - `Deck`, `DeckEntry`, `ExportFormat` from `deck`
//! - `VocabConfig`, `PathsConfig`, `FallbackConfig`, `ExportConfig` from `config`
//! - the segmentation and filtering API of `hanzi-vocab-core`

pub mod config;
pub mod corpus;
pub mod deck;
pub mod enrich;
pub mod lookup;
pub mod throttle;
pub mod tone;

// Re-export the pipeline pieces from core so callers need one crate.
pub use hanzi_vocab_core::{
    load_entries, parse_level, prompt_level, segment, segment_words, unknown_words,
    DictionaryEntry, FieldNames, KnownWordSet, LexiconIndex, LoadReport, PresenceIndex, Result,
    Segment, VocabError, WordLookup,
};

// Convenience re-exports for common types used by callers.
pub use config::{ExportConfig, FallbackConfig, PathsConfig, VocabConfig};
pub use corpus::{ExampleSentence, SentenceCorpus};
pub use deck::{Deck, DeckEntry, ExportFormat};
pub use enrich::Enricher;
pub use lookup::{parse_details_page, FallbackLookup, LookupOutcome, RemoteDictionary, RemoteRecord};
pub use throttle::RateLimiter;
pub use tone::{decode_phrase, decode_remote_pinyin, decode_syllable, decode_word};
