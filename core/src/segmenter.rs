//! Dictionary-driven word segmentation.
//!
//! Mandarin text carries no word boundaries, so they are rebuilt from
//! membership tests against a dictionary alone. The policy is greedy longest
//! match with one overlap heuristic:
//!
//! 1. Every character position is visited left to right. A position whose
//!    character is not itself a dictionary entry is skipped; punctuation,
//!    digits and unknown characters drop out this way.
//! 2. From a matching position the candidate is extended one character at a
//!    time for as long as the extended string is still a dictionary entry.
//!    The number of extensions is the match *depth*.
//! 3. The match is emitted unless the position just before it matched with
//!    nonzero depth and this match has depth zero: a lone character sitting
//!    inside the previous multi-character word is not reported again.
//!
//! Scanning never jumps past a matched span. Overlapping words are
//! therefore possible: with `不同` and `同意` both in the dictionary,
//! `不同意` yields both. That imprecision is accepted behaviour.
//!
//! # Example
//! ```
//! use hanzi_vocab_core::{segment_words, PresenceIndex};
//!
//! let dict: PresenceIndex = ["你好", "你", "好"].into_iter().collect();
//! assert_eq!(segment_words("你好吗", &dict), vec!["你好".to_string()]);
//! ```

use crate::lexicon::WordLookup;

/// Longest dictionary word found at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched text
    pub text: String,
    /// Extension steps taken beyond the first character
    pub depth: usize,
}

impl Match {
    /// Length of the match in characters.
    pub fn char_len(&self) -> usize {
        self.depth + 1
    }
}

/// An emitted word and where it starts in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Character (not byte) offset of the first character
    pub start: usize,
    pub depth: usize,
}

/// Find the longest dictionary string starting at `start`.
///
/// Returns `None` when `chars[start]` alone is not an entry or `start` is out
/// of range. Extension stops at the first character that makes the string
/// unknown, or at the end of the text.
pub fn longest_match<L: WordLookup + ?Sized>(
    chars: &[char],
    start: usize,
    lexicon: &L,
) -> Option<Match> {
    let first = *chars.get(start)?;
    let mut text = String::from(first);
    if !lexicon.contains(&text) {
        return None;
    }

    let mut depth = 0;
    for &ch in &chars[start + 1..] {
        text.push(ch);
        if !lexicon.contains(&text) {
            text.pop();
            break;
        }
        depth += 1;
    }

    Some(Match { text, depth })
}

/// Whether a match is emitted, given the depth found at the previous position.
fn keep_match(prev_depth: usize, depth: usize) -> bool {
    prev_depth == 0 || depth > 0
}

/// Segment `text` into dictionary words in scan order, duplicates kept.
///
/// The depth found at the previous position is carried into the next
/// iteration; a position without a match carries depth zero. Earlier
/// releases kept the last match's depth across such positions, so with
/// {喜, 喜欢, 好} the text `喜欢好` gave only `喜欢`; it now gives `喜欢`
/// and `好`.
pub fn segment<L: WordLookup + ?Sized>(text: &str, lexicon: &L) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut prev_depth = 0;

    for start in 0..chars.len() {
        let Some(m) = longest_match(&chars, start, lexicon) else {
            prev_depth = 0;
            continue;
        };
        if keep_match(prev_depth, m.depth) {
            segments.push(Segment {
                text: m.text,
                start,
                depth: m.depth,
            });
        }
        prev_depth = m.depth;
    }

    segments
}

/// Segment `text` and return only the word strings.
pub fn segment_words<L: WordLookup + ?Sized>(text: &str, lexicon: &L) -> Vec<String> {
    segment(text, lexicon).into_iter().map(|s| s.text).collect()
}
