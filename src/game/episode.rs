//! Episode driver
//!
//! Runs one strategy against one target: select, step, filter, record,
//! until the environment reports the episode done. Each call owns its own
//! candidate set and history, so episodes can run on separate threads.

use super::environment::{Environment, EnvironmentConfig};
use super::telemetry::{AttemptRecord, TelemetrySink};
use crate::core::{Observation, Word};
use crate::error::EngineError;
use crate::solver::{ConstraintTracker, Strategy};
use tracing::debug;

/// Outcome of one episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    pub target: Word,
    pub strategy: String,
    pub solved: bool,
    /// Guesses actually played
    pub attempts: usize,
    /// Attempts on a win, `max_attempts + 1` on a loss
    pub attempts_to_win: usize,
    pub total_reward: f64,
    pub history: Vec<Observation>,
    /// Candidates left after the last update
    pub remaining: usize,
}

impl EpisodeReport {
    /// Loss sentinel under the default six-attempt limit
    pub const LOSS_SENTINEL: usize = 7;
}

/// Play `target` to completion with `strategy`
///
/// The strategy is reset first, then starts from the whole corpus.
///
/// # Errors
/// `EngineError::NoCandidates` when the strategy has nothing left to guess
/// from, meaning the feedback history contradicts every corpus word.
///
/// # Examples
/// ```
/// use wordle_voi::core::Word;
/// use wordle_voi::game::{EnvironmentConfig, NullSink, run_episode};
/// use wordle_voi::solver::{RewardConfig, StrategyKind};
///
/// let corpus: Vec<Word> = ["crane", "slate", "trace", "plane"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
/// let mut strategy = StrategyKind::Random.build(RewardConfig::default(), Some(1));
///
/// let report = run_episode(
///     &mut strategy,
///     &corpus,
///     &corpus[2],
///     EnvironmentConfig::default(),
///     &mut NullSink,
/// )
/// .unwrap();
/// assert!(report.solved);
/// assert!((1..=4).contains(&report.attempts_to_win));
/// ```
pub fn run_episode<S, T>(
    strategy: &mut S,
    corpus: &[Word],
    target: &Word,
    config: EnvironmentConfig,
    sink: &mut T,
) -> Result<EpisodeReport, EngineError>
where
    S: Strategy + ?Sized,
    T: TelemetrySink + ?Sized,
{
    if corpus.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }

    strategy.reset();
    let mut env = Environment::new(config);
    env.reset_with(target.clone());

    let mut candidates = corpus.to_vec();
    let mut history: Vec<Observation> = Vec::new();
    let mut tracker = ConstraintTracker::new();
    let mut solved = false;

    while !env.is_done() {
        let attempt = env.attempts() + 1;
        let guess = strategy
            .select_guess(&candidates, &history)
            .ok_or(EngineError::NoCandidates { attempt })?;

        let violations = tracker.check(&guess);
        let outcome = env.step(&guess)?;
        solved = outcome.solved;

        let before = candidates.len();
        candidates = strategy.update_belief(&candidates, &guess, outcome.feedback);
        tracker.record(&guess, outcome.feedback);

        let (hamming, levenshtein) = AttemptRecord::distances(&guess, target);
        sink.record(AttemptRecord {
            attempt,
            guess: guess.clone(),
            feedback: outcome.feedback,
            candidates_before: before,
            candidates_after: candidates.len(),
            reward: outcome.reward,
            strategy: strategy.name().to_string(),
            violations,
            hamming,
            levenshtein,
        });

        history.push(Observation::new(guess, outcome.feedback));
    }

    let attempts = env.attempts();
    let attempts_to_win = if solved {
        attempts
    } else {
        config.max_attempts + 1
    };

    debug!(
        target = %target,
        strategy = strategy.name(),
        solved,
        attempts,
        reward = env.total_reward(),
        "episode finished"
    );

    Ok(EpisodeReport {
        target: target.clone(),
        strategy: strategy.name().to_string(),
        solved,
        attempts,
        attempts_to_win,
        total_reward: env.total_reward(),
        history,
        remaining: candidates.len(),
    })
}
