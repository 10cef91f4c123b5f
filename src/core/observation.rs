//! One attempt's guess and the feedback it received

use super::{Pattern, Word};
use std::fmt;

/// A (guess, feedback) pair, appended to an episode's history once per attempt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation {
    pub guess: Word,
    pub feedback: Pattern,
}

impl Observation {
    #[must_use]
    pub const fn new(guess: Word, feedback: Pattern) -> Self {
        Self { guess, feedback }
    }
}

/// Check whether `word` was already played in `history`
#[must_use]
pub fn already_guessed(history: &[Observation], word: &Word) -> bool {
    history.iter().any(|obs| &obs.guess == word)
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.guess, self.feedback)
    }
}
