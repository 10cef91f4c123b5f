//! Episode environment
//!
//! Holds the hidden target and the reward accounting for one episode.
//! `Idle -> reset -> AwaitingGuess -> step... -> Done`; stepping outside
//! `AwaitingGuess` is an error.

use crate::core::{Observation, Pattern, Word};
use crate::error::EngineError;
use rand::Rng;

/// Reward model and attempt limit of the environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfig {
    pub max_attempts: usize,
    /// Penalty for the first attempt (negative)
    pub base_penalty: f64,
    /// Fractional growth of the penalty per extra attempt
    pub penalty_increase: f64,
    /// Reward per EXACT mark
    pub exact_reward: f64,
    /// Reward per PARTIAL mark
    pub partial_reward: f64,
    /// Bonus for hitting the target
    pub success_reward: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_penalty: -1.0,
            penalty_increase: 0.5,
            exact_reward: 0.5,
            partial_reward: 0.2,
            success_reward: 10.0,
        }
    }
}

impl EnvironmentConfig {
    /// Penalty charged on `attempt` (1-based)
    ///
    /// `base × (1 + increase × (attempt − 1))`, so each later attempt costs
    /// strictly more than the one before.
    #[must_use]
    pub fn penalty_for_attempt(&self, attempt: usize) -> f64 {
        let extra = attempt.saturating_sub(1) as f64;
        self.base_penalty * self.penalty_increase.mul_add(extra, 1.0)
    }
}

/// Where the environment is in its episode lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Idle,
    AwaitingGuess,
    Done,
}

/// Result of a single `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub feedback: Pattern,
    pub reward: f64,
    pub solved: bool,
    pub done: bool,
}

/// One episode's hidden state
#[derive(Debug, Clone)]
pub struct Environment {
    config: EnvironmentConfig,
    target: Option<Word>,
    attempts: usize,
    history: Vec<Observation>,
    total_reward: f64,
    status: EpisodeStatus,
}

impl Environment {
    #[must_use]
    pub const fn new(config: EnvironmentConfig) -> Self {
        Self {
            config,
            target: None,
            attempts: 0,
            history: Vec::new(),
            total_reward: 0.0,
            status: EpisodeStatus::Idle,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Start an episode with a fixed target
    pub fn reset_with(&mut self, target: Word) {
        self.target = Some(target);
        self.attempts = 0;
        self.history.clear();
        self.total_reward = 0.0;
        self.status = EpisodeStatus::AwaitingGuess;
    }

    /// Start an episode with a target drawn uniformly from `corpus`
    ///
    /// # Errors
    /// `EngineError::EmptyCorpus` if there is nothing to draw from.
    pub fn reset_random<R: Rng + ?Sized>(
        &mut self,
        corpus: &[Word],
        rng: &mut R,
    ) -> Result<&Word, EngineError> {
        if corpus.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }
        let target = corpus[rng.random_range(0..corpus.len())].clone();
        self.reset_with(target);
        self.target.as_ref().ok_or(EngineError::NotStarted)
    }

    /// Play one guess
    ///
    /// The reward for the attempt is the progressive penalty plus partial
    /// credit per mark, plus the success bonus on a hit. The episode ends on a
    /// hit or once `max_attempts` guesses have been played.
    ///
    /// # Errors
    /// `NotStarted` before any reset, `EpisodeFinished` after the episode ended.
    pub fn step(&mut self, guess: &Word) -> Result<StepOutcome, EngineError> {
        let target = match self.status {
            EpisodeStatus::Idle => return Err(EngineError::NotStarted),
            EpisodeStatus::Done => return Err(EngineError::EpisodeFinished),
            EpisodeStatus::AwaitingGuess => self.target.as_ref().ok_or(EngineError::NotStarted)?,
        };
        let feedback = Pattern::calculate(guess, target);
        let solved = guess == target;

        self.attempts += 1;
        let mut reward = self.config.penalty_for_attempt(self.attempts)
            + self.config.exact_reward * feedback.count_exact() as f64
            + self.config.partial_reward * feedback.count_partial() as f64;
        if solved {
            reward += self.config.success_reward;
        }

        let done = solved || self.attempts >= self.config.max_attempts;
        if done {
            self.status = EpisodeStatus::Done;
        }

        self.total_reward += reward;
        self.history.push(Observation::new(guess.clone(), feedback));

        Ok(StepOutcome {
            feedback,
            reward,
            solved,
            done,
        })
    }

    #[must_use]
    pub fn penalty_for_attempt(&self, attempt: usize) -> f64 {
        self.config.penalty_for_attempt(attempt)
    }

    #[must_use]
    pub const fn total_reward(&self) -> f64 {
        self.total_reward
    }

    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    #[must_use]
    pub const fn target(&self) -> Option<&Word> {
        self.target.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> EpisodeStatus {
        self.status
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == EpisodeStatus::Done
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(EnvironmentConfig::default())
    }
}
