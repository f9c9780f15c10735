//! Pinyin deck configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `hanzi_vocab_core::Config` (flattened via serde)
//! - Locations of the input text, dictionaries, corpus and output deck
//! - Fallback dictionary lookup settings
//! - Deck export settings
//!
//! Every key is optional in TOML; missing keys take the defaults below.
//!
//! # Example
//!
//! ```rust
//! use hanzi_vocab::VocabConfig;
//!
//! let config = VocabConfig::from_toml_str("decode_lexicon_pinyin = false").unwrap();
//! assert!(!config.decode_lexicon_pinyin);
//! assert_eq!(config.base().max_level, 6);
//! ```

use hanzi_vocab_core::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::deck::ExportFormat;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabConfig {
    /// Base configuration fields (dictionary attribute names, level bound)
    #[serde(flatten)]
    pub base: hanzi_vocab_core::Config,

    /// Render lexicon pinyin ("ni3 hao3") with tone marks ("nǐ hǎo")
    pub decode_lexicon_pinyin: bool,

    pub paths: PathsConfig,
    pub fallback: FallbackConfig,
    pub export: ExportConfig,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            base: hanzi_vocab_core::Config::default(),
            decode_lexicon_pinyin: true,
            paths: PathsConfig::default(),
            fallback: FallbackConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Text to extract vocabulary from
    pub input: PathBuf,
    /// Graded word list (JSON array, level per entry)
    pub hsk: PathBuf,
    /// Words the learner has marked as known (JSON array)
    pub saved: PathBuf,
    /// Enrichment lexicon (CE-DICT as a JSON array)
    pub lexicon: PathBuf,
    /// Example sentences (TSV)
    pub sentences: PathBuf,
    /// Where the deck is written
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input/file.txt"),
            hsk: PathBuf::from("data/hsk.json"),
            saved: PathBuf::from("data/saved.json"),
            lexicon: PathBuf::from("data/cedict.json"),
            sentences: PathBuf::from("data/sentences.tsv"),
            output: PathBuf::from("output/deck.tsv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Query the remote dictionary for words without a local example
    pub enabled: bool,
    /// Details page URL; `{word}` is replaced by the percent-encoded word
    pub url_template: String,
    pub user_agent: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Minimum time between the starts of two requests, in milliseconds
    pub min_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: "https://www.purpleculture.net/dictionary-details/?word={word}"
                .to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36"
                .to_string(),
            timeout_ms: 10_000,
            min_delay_ms: 10_000,
        }
    }
}

impl FallbackConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Also write entries that have no example sentence (tagged `incomplete`)
    pub include_incomplete: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Tsv,
            include_incomplete: true,
        }
    }
}

impl VocabConfig {
    /// Convert this config into the base config
    pub fn into_base(self) -> hanzi_vocab_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &hanzi_vocab_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut hanzi_vocab_core::Config {
        &mut self.base
    }

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
