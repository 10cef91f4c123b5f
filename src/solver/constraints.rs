//! Feedback-compliance checking
//!
//! Accumulates explicit green/yellow/gray constraints from a history and
//! counts how many of them a guess breaks. This is a diagnostic for players
//! that do not filter (external providers, pure random); candidate filtering
//! itself always re-derives full patterns.

use crate::core::{Mark, Observation, Pattern, WORD_LENGTH, Word, letter_index};
use std::ops::AddAssign;

/// Per-kind violation counts for one guess
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintViolations {
    /// Known green positions holding a different letter
    pub green: usize,
    /// Yellow letters missing from the guess, or placed where they were yellow
    pub yellow: usize,
    /// Letters known to be absent that appear anyway
    pub gray: usize,
}

impl ConstraintViolations {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.green + self.yellow + self.gray
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for ConstraintViolations {
    fn add_assign(&mut self, rhs: Self) {
        self.green += rhs.green;
        self.yellow += rhs.yellow;
        self.gray += rhs.gray;
    }
}

/// Green/yellow/gray constraint sets built from observed feedback
#[derive(Debug, Clone, Default)]
pub struct ConstraintTracker {
    green: [Option<u8>; WORD_LENGTH],
    /// Per letter: positions where it was marked yellow
    yellow: [[bool; WORD_LENGTH]; 26],
    gray: [bool; 26],
}

impl ConstraintTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker from a full history
    #[must_use]
    pub fn from_history(history: &[Observation]) -> Self {
        let mut tracker = Self::new();
        for obs in history {
            tracker.record(&obs.guess, obs.feedback);
        }
        tracker
    }

    /// Add the constraints implied by one observation
    ///
    /// An absent letter only becomes gray when the same letter is not green or
    /// yellow elsewhere in that guess.
    pub fn record(&mut self, guess: &Word, feedback: Pattern) {
        let marks = feedback.marks();
        for (pos, (&letter, &mark)) in guess.chars().iter().zip(marks.iter()).enumerate() {
            let idx = letter_index(letter);
            match mark {
                Mark::Exact => self.green[pos] = Some(letter),
                Mark::Partial => self.yellow[idx][pos] = true,
                Mark::Absent => {
                    let credited = guess
                        .chars()
                        .iter()
                        .zip(marks.iter())
                        .any(|(&other, &m)| other == letter && m != Mark::Absent);
                    if !credited {
                        self.gray[idx] = true;
                    }
                }
            }
        }
    }

    /// Count the constraints `guess` breaks
    #[must_use]
    pub fn check(&self, guess: &Word) -> ConstraintViolations {
        let green = self
            .green
            .iter()
            .enumerate()
            .filter(|&(pos, required)| required.is_some_and(|letter| guess.char_at(pos) != letter))
            .count();

        let mut yellow = 0;
        for (idx, positions) in self.yellow.iter().enumerate() {
            if !positions.iter().any(|&p| p) {
                continue;
            }
            let letter = b'A' + idx as u8;
            if !guess.has_letter(letter) {
                yellow += 1;
            }
            yellow += positions
                .iter()
                .enumerate()
                .filter(|&(pos, &marked)| marked && guess.char_at(pos) == letter)
                .count();
        }

        let gray = self
            .gray
            .iter()
            .enumerate()
            .filter(|&(idx, &gray)| gray && guess.has_letter(b'A' + idx as u8))
            .count();

        ConstraintViolations { green, yellow, gray }
    }
}

/// Violations of `guess` against everything observed before it
#[must_use]
pub fn violations_against(history: &[Observation], guess: &Word) -> ConstraintViolations {
    ConstraintTracker::from_history(history).check(guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::filter::is_consistent;

    fn word(w: &str) -> Word {
        Word::new(w).unwrap()
    }

    fn observe(guess: &str, target: &str) -> Observation {
        let guess = word(guess);
        let feedback = Pattern::calculate(&guess, &word(target));
        Observation::new(guess, feedback)
    }

    #[test]
    fn consistent_guess_is_clean() {
        let history = [observe("crane", "trace")];
        let v = violations_against(&history, &word("trace"));
        assert!(v.is_clean());
    }

    #[test]
    fn counts_each_kind() {
        // CRANE vs TRACE: C yellow@0, R green@1, A green@2, N gray, E green@4
        let history = [observe("crane", "trace")];
        let tracker = ConstraintTracker::from_history(&history);

        // SLOPE: misses R and A greens, lacks yellow C
        let v = tracker.check(&word("slope"));
        assert_eq!(v.green, 2);
        assert_eq!(v.yellow, 1);
        assert_eq!(v.gray, 0);

        // CRANE again: C at its yellow position, N is gray
        let v = tracker.check(&word("crane"));
        assert_eq!(v.green, 0);
        assert_eq!(v.yellow, 1);
        assert_eq!(v.gray, 1);
        assert_eq!(v.total(), 2);
    }

    #[test]
    fn duplicate_absent_letter_is_not_gray() {
        // EERIE vs CRANE: two E absent but the last E is green; only I is gray
        let history = [observe("eerie", "crane")];
        assert_eq!(history[0].feedback, Pattern::parse("--Y-G").unwrap());
        let tracker = ConstraintTracker::from_history(&history);

        assert!(tracker.check(&word("crane")).is_clean());
        assert_eq!(tracker.check(&word("irate")).gray, 1);
    }

    #[test]
    fn agrees_with_filter_on_consistent_words() {
        let targets = ["trace", "grate", "speed", "erase", "robot"];
        let guesses = ["crane", "slate", "eerie", "floor"];
        for target in targets {
            for guess in guesses {
                let history = [observe(guess, target)];
                let candidate = word(target);
                assert!(is_consistent(&candidate, &history[0].guess, history[0].feedback));
                assert!(violations_against(&history, &candidate).is_clean());
            }
        }
    }

    #[test]
    fn violations_accumulate() {
        let mut total = ConstraintViolations::default();
        total += ConstraintViolations { green: 1, yellow: 0, gray: 2 };
        total += ConstraintViolations { green: 0, yellow: 3, gray: 0 };
        assert_eq!(total.total(), 6);
    }
}
