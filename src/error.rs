//! Error types for episode execution

use crate::core::WordError;
use thiserror::Error;

/// Errors raised while driving an episode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The feedback history is inconsistent with every corpus word
    #[error("no candidates remain at attempt {attempt}: feedback history contradicts the corpus")]
    NoCandidates { attempt: usize },

    /// `step` was called after the episode reached a terminal state
    #[error("episode is already finished")]
    EpisodeFinished,

    /// `step` was called before `reset`
    #[error("episode has not been started")]
    NotStarted,

    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("invalid word: {0}")]
    InvalidWord(#[from] WordError),
}
