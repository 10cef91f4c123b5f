//! External guess providers
//!
//! A provider is an opaque `(candidates, history) -> word` function, such as a
//! language-model player. Its failures never escape: the adapter turns them
//! into `None` so a hybrid falls back to its paired strategy.

use super::filter::filter_candidates;
use super::strategy::Strategy;
use crate::core::{Observation, Pattern, Word, WordError, already_guessed};
use thiserror::Error;
use tracing::warn;

/// Failure reported by an external guess provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider returned an invalid word: {0}")]
    InvalidWord(#[from] WordError),
    #[error("provider repeated an earlier guess: {0}")]
    Repeated(Word),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of guesses outside the built-in strategies
pub trait GuessProvider {
    /// Raw guess text for the current position
    ///
    /// # Errors
    /// Any failure to produce a guess; the caller falls back.
    fn provide(&mut self, candidates: &[Word], history: &[Observation]) -> Result<String, ProviderError>;
}

impl<F> GuessProvider for F
where
    F: FnMut(&[Word], &[Observation]) -> Result<String, ProviderError>,
{
    fn provide(&mut self, candidates: &[Word], history: &[Observation]) -> Result<String, ProviderError> {
        self(candidates, history)
    }
}

/// Adapts a `GuessProvider` to the `Strategy` trait
///
/// Candidates are narrowed with the exact filter, since the provider keeps no
/// belief of its own.
pub struct ProviderStrategy<P> {
    provider: P,
    name: String,
    failures: usize,
}

impl<P: GuessProvider> ProviderStrategy<P> {
    #[must_use]
    pub fn new(name: impl Into<String>, provider: P) -> Self {
        Self {
            provider,
            name: name.into(),
            failures: 0,
        }
    }

    /// Number of failed or rejected guesses so far
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }

    fn try_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Result<Word, ProviderError> {
        let raw = self.provider.provide(candidates, history)?;
        let guess = Word::new(raw.trim())?;
        if already_guessed(history, &guess) {
            return Err(ProviderError::Repeated(guess));
        }
        Ok(guess)
    }
}

impl<P: GuessProvider> Strategy for ProviderStrategy<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        filter_candidates(candidates, guess, feedback)
    }

    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        match self.try_guess(candidates, history) {
            Ok(guess) => Some(guess),
            Err(e) => {
                self.failures += 1;
                warn!(provider = %self.name, error = %e, "guess provider failed");
                None
            }
        }
    }

    fn reset(&mut self) {
        self.failures = 0;
    }
}
