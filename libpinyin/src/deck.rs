//! Flashcard deck: the enriched entries plus what the pipeline left out.
//!
//! The TSV layout imports directly into Anki with "fields separated by tab":
//!
//! ```text
//! word  pinyin  definition  example  example pinyin  translation  tags
//! ```
//!
//! Entries without an example sentence carry the tag `incomplete`.

use hanzi_vocab_core::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::config::ExportConfig;
use crate::corpus::ExampleSentence;

const INCOMPLETE_TAG: &str = "incomplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Tsv,
    Json,
}

/// One study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub word: String,
    pub pinyin: String,
    pub definition: String,
    pub example: Option<ExampleSentence>,
}

impl DeckEntry {
    pub fn is_complete(&self) -> bool {
        self.example.is_some()
    }
}

/// Flat export row: the example columns sit beside the word columns, empty
/// when the entry has no example.
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    word: &'a str,
    pinyin: &'a str,
    definition: &'a str,
    example: &'a str,
    example_pinyin: &'a str,
    example_translation: &'a str,
}

impl<'a> From<&'a DeckEntry> for ExportRecord<'a> {
    fn from(entry: &'a DeckEntry) -> Self {
        let (example, example_pinyin, example_translation) = match &entry.example {
            Some(ex) => (ex.sentence.as_str(), ex.pinyin.as_str(), ex.translation.as_str()),
            None => ("", "", ""),
        };
        Self {
            word: &entry.word,
            pinyin: &entry.pinyin,
            definition: &entry.definition,
            example,
            example_pinyin,
            example_translation,
        }
    }
}

/// Output of the enrichment pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deck {
    pub entries: Vec<DeckEntry>,
    /// Words with no usable lexicon definition
    pub dropped: Vec<String>,
    /// Words kept without an example sentence
    pub incomplete: Vec<String>,
}

fn sanitize(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

impl Deck {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries selected for export.
    pub fn exported(&self, include_incomplete: bool) -> impl Iterator<Item = &DeckEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| include_incomplete || e.is_complete())
    }

    /// Write one tab-separated line per exported entry. Returns the number of
    /// lines written.
    pub fn write_tsv<W: Write>(&self, mut writer: W, include_incomplete: bool) -> io::Result<usize> {
        let mut written = 0;
        for entry in self.exported(include_incomplete) {
            let record = ExportRecord::from(entry);
            let tags = if entry.is_complete() { "" } else { INCOMPLETE_TAG };
            let fields = [
                record.word,
                record.pinyin,
                record.definition,
                record.example,
                record.example_pinyin,
                record.example_translation,
                tags,
            ];
            let line = fields.iter().map(|f| sanitize(f)).collect::<Vec<_>>().join("\t");
            writeln!(writer, "{}", line)?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }

    pub fn to_tsv_string(&self, include_incomplete: bool) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_tsv(&mut buf, include_incomplete);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the exported entries as a pretty-printed JSON array of flat
    /// records (`word`, `pinyin`, `definition`, `example`, `example_pinyin`,
    /// `example_translation`).
    pub fn write_json<W: Write>(
        &self,
        mut writer: W,
        include_incomplete: bool,
    ) -> serde_json::Result<usize> {
        let records: Vec<ExportRecord<'_>> = self
            .exported(include_incomplete)
            .map(ExportRecord::from)
            .collect();
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writer.flush().map_err(serde_json::Error::io)?;
        Ok(records.len())
    }

    /// Write the deck to `path` in the configured format, creating parent
    /// directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P, export: &ExportConfig) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| VocabError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| VocabError::io(path, e))?;
        let writer = BufWriter::new(file);

        let written = match export.format {
            ExportFormat::Tsv => self
                .write_tsv(writer, export.include_incomplete)
                .map_err(|e| VocabError::io(path, e))?,
            ExportFormat::Json => self
                .write_json(writer, export.include_incomplete)
                .map_err(|e| VocabError::Export(format!("{}: {}", path.display(), e)))?,
        };
        info!(path = %path.display(), entries = written, "deck written");
        Ok(written)
    }
}
