//! Candidate filtering
//!
//! A word stays a candidate iff guessing `guess` against it would have produced
//! exactly the observed pattern. Re-deriving the full pattern is the single
//! source of truth for consistency; `ConstraintTracker` is only a diagnostic.

use crate::core::{Observation, Pattern, WORD_LENGTH, Word};
use tracing::warn;

/// Check whether `word` could be the target given one observation
#[inline]
#[must_use]
pub fn is_consistent(word: &Word, guess: &Word, observed: Pattern) -> bool {
    Pattern::calculate(guess, word) == observed
}

/// Keep only the candidates consistent with `guess` producing `observed`
///
/// The output is always a subset of the input and preserves its order.
///
/// # Examples
/// ```
/// use wordle_voi::core::{Pattern, Word};
/// use wordle_voi::solver::filter::filter_candidates;
///
/// let words: Vec<Word> = ["crane", "slate", "trace", "plane"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
/// let guess = Word::new("crane").unwrap();
/// let observed = Pattern::parse("YGG-G").unwrap();
///
/// let remaining = filter_candidates(&words, &guess, observed);
/// assert_eq!(remaining, vec![Word::new("trace").unwrap()]);
/// ```
#[must_use]
pub fn filter_candidates(candidates: &[Word], guess: &Word, observed: Pattern) -> Vec<Word> {
    candidates
        .iter()
        .filter(|word| is_consistent(word, guess, observed))
        .cloned()
        .collect()
}

/// Keep only the candidates consistent with every observation in `history`
#[must_use]
pub fn filter_history(candidates: &[Word], history: &[Observation]) -> Vec<Word> {
    candidates
        .iter()
        .filter(|word| {
            history
                .iter()
                .all(|obs| is_consistent(word, &obs.guess, obs.feedback))
        })
        .cloned()
        .collect()
}

/// Filter from raw row data (`"CRANE"`, `"YGG-G"`)
///
/// Rows whose guess or feedback is not exactly five symbols, or that do not
/// parse, leave the candidate set unchanged. Batch runs over recorded games
/// must not abort on one bad row, so this is a logged no-op rather than an
/// error.
#[must_use]
pub fn filter_by_feedback_str(candidates: &[Word], guess: &str, feedback: &str) -> Vec<Word> {
    if guess.chars().count() != WORD_LENGTH || feedback.chars().count() != WORD_LENGTH {
        warn!(guess, feedback, "malformed feedback row, candidates left unchanged");
        return candidates.to_vec();
    }

    let (Ok(guess_word), Some(pattern)) = (Word::new(guess), Pattern::parse(feedback)) else {
        warn!(guess, feedback, "unparseable feedback row, candidates left unchanged");
        return candidates.to_vec();
    };

    filter_candidates(candidates, &guess_word, pattern)
}
