//! Per-attempt telemetry
//!
//! The episode driver emits one `AttemptRecord` per attempt to whatever sink
//! the caller provides. Nothing here persists data.

use super::metrics::{hamming_distance, information_gain, levenshtein_distance, reduction_rate};
use crate::core::{Pattern, Word};
use crate::solver::ConstraintViolations;

/// Everything observed about one attempt
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: usize,
    pub guess: Word,
    pub feedback: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub reward: f64,
    /// Name of the strategy that produced the guess
    pub strategy: String,
    /// Constraints from earlier attempts that this guess ignored
    pub violations: ConstraintViolations,
    pub hamming: usize,
    pub levenshtein: usize,
}

impl AttemptRecord {
    /// Bits gained by this attempt's filtering
    #[must_use]
    pub fn information_gain(&self) -> f64 {
        information_gain(self.candidates_before, self.candidates_after)
    }

    #[must_use]
    pub fn reduction_rate(&self) -> f64 {
        reduction_rate(self.candidates_before, self.candidates_after)
    }

    pub(crate) fn distances(guess: &Word, target: &Word) -> (usize, usize) {
        (
            hamming_distance(guess, target),
            levenshtein_distance(guess, target),
        )
    }
}

/// Consumer of attempt records
pub trait TelemetrySink {
    fn record(&mut self, record: AttemptRecord);
}

impl TelemetrySink for Vec<AttemptRecord> {
    fn record(&mut self, record: AttemptRecord) {
        self.push(record);
    }
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record(&mut self, _record: AttemptRecord) {}
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn record(&mut self, record: AttemptRecord) {
        (**self).record(record);
    }
}
