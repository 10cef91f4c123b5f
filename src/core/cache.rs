//! Memoized pattern calculation
//!
//! Selectors evaluate the same (guess, target) pairs many times within an
//! episode. The cache is owned by whoever needs it; nothing is process-wide.

use super::{Pattern, Word};
use super::word::WORD_LENGTH;
use rustc_hash::FxHashMap;

type Key = ([u8; WORD_LENGTH], [u8; WORD_LENGTH]);

/// Cache of `Pattern::calculate` results keyed by (guess, target)
///
/// Bounded by corpus² entries. Not required for correctness.
#[derive(Debug, Default, Clone)]
pub struct FeedbackCache {
    entries: FxHashMap<Key, Pattern>,
    hits: u64,
    misses: u64,
}

impl FeedbackCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern for `guess` played against `target`, computed at most once
    pub fn pattern(&mut self, guess: &Word, target: &Word) -> Pattern {
        let key = (*guess.chars(), *target.chars());
        if let Some(&pattern) = self.entries.get(&key) {
            self.hits += 1;
            return pattern;
        }
        self.misses += 1;
        let pattern = Pattern::calculate(guess, target);
        self.entries.insert(key, pattern);
        pattern
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation or the last `clear`
    #[must_use]
    pub const fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_returns_calculated_pattern() {
        let guess = Word::new("erase").unwrap();
        let target = Word::new("speed").unwrap();
        let mut cache = FeedbackCache::new();

        let cached = cache.pattern(&guess, &target);
        assert_eq!(cached, Pattern::calculate(&guess, &target));
    }

    #[test]
    fn cache_hits_on_repeat_queries() {
        let guess = Word::new("crane").unwrap();
        let target = Word::new("trace").unwrap();
        let mut cache = FeedbackCache::new();

        cache.pattern(&guess, &target);
        cache.pattern(&guess, &target);
        cache.pattern(&target, &guess);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats(), (1, 2));
    }

    #[test]
    fn cache_clear_resets() {
        let word = Word::new("slate").unwrap();
        let mut cache = FeedbackCache::new();
        cache.pattern(&word, &word);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), (0, 0));
    }
}
