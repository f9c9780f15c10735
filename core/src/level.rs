//! Proficiency level input.

use std::io::{BufRead, Write};

use crate::error::{Result, VocabError};

/// Highest HSK 2.0 level.
pub const DEFAULT_MAX_LEVEL: u8 = 6;

/// Parse a level in `0..=max`.
pub fn parse_level(input: &str, max: u8) -> Result<u8> {
    let trimmed = input.trim();
    match trimmed.parse::<u8>() {
        Ok(level) if level <= max => Ok(level),
        _ => Err(VocabError::InvalidLevel {
            input: trimmed.to_string(),
            max,
        }),
    }
}

/// Ask for a level until a valid one is entered.
///
/// Invalid answers are reported on `writer` and asked again. End of input
/// is an error rather than a silent default.
pub fn prompt_level<R: BufRead, W: Write>(mut reader: R, mut writer: W, max: u8) -> Result<u8> {
    let stdio = |e: std::io::Error| VocabError::io("<stdin>", e);
    loop {
        write!(
            writer,
            "Enter your HSK level (highest level fully completed, 0-{}): ",
            max
        )
        .map_err(stdio)?;
        writer.flush().map_err(stdio)?;

        let mut line = String::new();
        if reader.read_line(&mut line).map_err(stdio)? == 0 {
            return Err(VocabError::io(
                "<stdin>",
                std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed before a level was entered",
                ),
            ));
        }

        match parse_level(&line, max) {
            Ok(level) => return Ok(level),
            Err(e) => writeln!(writer, "{}", e).map_err(stdio)?,
        }
    }
}
