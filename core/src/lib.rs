//! hanzi-vocab-core
//!
//! Language-agnostic pieces of the vocabulary extraction pipeline: dictionary
//! indexes, dictionary-driven word segmentation, the known-word set and the
//! vocabulary filter. The pinyin-specific enrichment, the deck export and the
//! command line live in the `hanzi-vocab` crate.
//!
//! Public API:
//! - `DictionaryEntry`, `LexiconIndex`, `PresenceIndex` - dictionary data and lookup
//! - `segment`, `longest_match` - greedy longest-match segmentation
//! - `KnownWordSet` - words at or below the learner's level plus saved words
//! - `unknown_words` - deduplicated segments minus known words
//! - `Config` - dictionary attribute names and level bound
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Result, VocabError};

pub mod lexicon;
pub use lexicon::{
    load_entries, parse_entries, parse_records, DictionaryEntry, FieldNames, LexiconIndex,
    LoadReport, PresenceIndex, WordLookup,
};

pub mod segmenter;
pub use segmenter::{longest_match, segment, segment_words, Match, Segment};

pub mod known;
pub use known::KnownWordSet;

pub mod filter;
pub use filter::unknown_words;

pub mod level;
pub use level::{parse_level, prompt_level, DEFAULT_MAX_LEVEL};

/// Generic configuration for dictionary loading.
///
/// Paths and language-specific options (pinyin rendering, fallback lookup)
/// belong in `VocabConfig` in the `hanzi-vocab` crate, which flattens this
/// struct into its own TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Attribute names in the graded word list and the saved-words list
    pub known_fields: FieldNames,
    /// Attribute names in the enrichment lexicon (CE-DICT style)
    pub lexicon_fields: FieldNames,
    /// Highest proficiency level accepted from the user
    pub max_level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            known_fields: FieldNames::default(),
            lexicon_fields: FieldNames::default().with_word_key("simplified"),
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| VocabError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| VocabError::io(path, e))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VocabError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VocabError::Config(e.to_string()))
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}
