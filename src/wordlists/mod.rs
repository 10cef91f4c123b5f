//! Word lists
//!
//! The default corpus is compiled into the binary; other corpora can be
//! loaded from disk with the same normalization.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};

use crate::core::Word;

/// The embedded corpus as words
#[must_use]
pub fn default_corpus() -> Vec<Word> {
    loader::words_from_slice(WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_words_are_valid_uppercase() {
        for &word in WORDS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
        }
    }

    #[test]
    fn embedded_corpus_is_duplicate_free() {
        assert_eq!(default_corpus().len(), WORDS_COUNT);
    }

    #[test]
    fn corpus_is_larger_than_every_sample_cap() {
        use crate::solver::{CssConfig, VoiConfig};

        let voi = VoiConfig::default();
        let largest_cap = CssConfig::default()
            .sample_size
            .max(voi.sample_size)
            .max(voi.opening_sample);
        assert!(WORDS_COUNT > 10 * largest_cap, "only {WORDS_COUNT} words");
    }

    #[test]
    fn corpus_contains_scenario_words() {
        let corpus = default_corpus();
        for text in ["CRANE", "SLATE", "TRACE", "PLANE"] {
            assert!(corpus.iter().any(|w| w.text() == text), "{text} missing");
        }
    }
}
