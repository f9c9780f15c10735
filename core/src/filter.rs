//! Vocabulary filter: segmented words minus the known ones.

use ahash::AHashSet;

use crate::lexicon::WordLookup;

/// Distinct words from `words` that `known` does not contain.
///
/// Order follows first occurrence. Matching is exact string equality, so a
/// known compound does not hide its parts when they were segmented on their
/// own.
pub fn unknown_words<S, K>(words: &[S], known: &K) -> Vec<String>
where
    S: AsRef<str>,
    K: WordLookup + ?Sized,
{
    let mut seen = AHashSet::new();
    words
        .iter()
        .map(|w| w.as_ref())
        .filter(|w| !known.contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::known::KnownWordSet;

    #[test]
    fn test_dedup_and_remove_known() {
        let known: KnownWordSet = ["你好"].into_iter().collect();
        let result = unknown_words(&["你好", "你好", "再见"], &known);
        assert_eq!(result, vec!["再见"]);
    }

    #[test]
    fn test_first_occurrence_order() {
        let known = KnownWordSet::new();
        let result = unknown_words(&["乙", "甲", "乙", "丙", "甲"], &known);
        assert_eq!(result, vec!["乙", "甲", "丙"]);
    }

    #[test]
    fn test_known_compound_does_not_hide_parts() {
        let known: KnownWordSet = ["不同意"].into_iter().collect();
        let words = vec!["不同".to_string(), "同意".to_string()];
        assert_eq!(unknown_words(&words, &known), vec!["不同", "同意"]);
    }
}
