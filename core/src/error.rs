//! Error type shared by the vocabulary pipeline crates.
//!
//! Only whole-file problems surface as errors. Per-record problems (a
//! dictionary entry without its key, a short corpus line) are logged and
//! skipped by the loaders instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading dictionaries, reading configuration or
/// writing a deck.
#[derive(Error, Debug)]
pub enum VocabError {
    /// A file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary file is not valid JSON
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A dictionary file parsed but its top level is not an array of records
    #[error("expected a JSON array of records in {0}")]
    NotAnArray(String),

    /// A proficiency level outside `0..=max` or not a whole number
    #[error("invalid proficiency level '{input}': expected a whole number from 0 to {max}")]
    InvalidLevel { input: String, max: u8 },

    /// Configuration could not be parsed or serialized
    #[error("configuration error: {0}")]
    Config(String),

    /// Deck export failed
    #[error("export error: {0}")]
    Export(String),
}

impl VocabError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, VocabError>;
