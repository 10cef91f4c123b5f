//! Batch evaluation
//!
//! Plays a strategy against every target in a list and aggregates the
//! outcomes. Episodes run in parallel; each one builds its own strategy from
//! the factory, so the only shared data is the read-only corpus.

use crate::core::Word;
use crate::error::EngineError;
use crate::game::{EnvironmentConfig, EpisodeReport, NullSink, run_episode};
use crate::solver::Strategy;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Knobs for one evaluation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    pub environment: EnvironmentConfig,
    /// Base seed; episode `i` is seeded with `seed + i`
    pub seed: Option<u64>,
    /// Only play the first `limit` targets
    pub limit: Option<usize>,
    pub show_progress: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            seed: None,
            limit: None,
            show_progress: true,
        }
    }
}

/// Aggregate statistics over a batch of episodes
#[derive(Debug, Clone)]
pub struct EvaluationSummary {
    pub strategy: String,
    pub games: usize,
    pub wins: usize,
    /// Episodes aborted because no candidate was left
    pub contradictions: usize,
    /// Count per `attempts_to_win`, losses under the sentinel
    pub distribution: FxHashMap<usize, usize>,
    /// Sum of attempts over won games
    pub attempts_on_wins: usize,
    /// Sum of total rewards over completed episodes
    pub total_reward: f64,
    /// Targets that were not solved, in input order
    pub missed: Vec<Word>,
    pub duration: Duration,
    /// Bucket holding losses and contradictions
    pub loss_sentinel: usize,
}

impl EvaluationSummary {
    fn new(strategy: String, loss_sentinel: usize) -> Self {
        Self {
            strategy,
            games: 0,
            wins: 0,
            contradictions: 0,
            distribution: FxHashMap::default(),
            attempts_on_wins: 0,
            total_reward: 0.0,
            missed: Vec::new(),
            duration: Duration::ZERO,
            loss_sentinel,
        }
    }

    /// Fold one episode outcome into the summary
    ///
    /// A contradiction counts as a lost game.
    pub fn add(&mut self, target: &Word, outcome: &Result<EpisodeReport, EngineError>) {
        self.games += 1;
        match outcome {
            Ok(report) if report.solved => {
                self.wins += 1;
                self.attempts_on_wins += report.attempts_to_win;
                self.total_reward += report.total_reward;
                *self.distribution.entry(report.attempts_to_win).or_insert(0) += 1;
            }
            Ok(report) => {
                self.total_reward += report.total_reward;
                *self.distribution.entry(self.loss_sentinel).or_insert(0) += 1;
                self.missed.push(target.clone());
            }
            Err(e) => {
                warn!(target = %target, error = %e, "episode aborted");
                self.contradictions += 1;
                *self.distribution.entry(self.loss_sentinel).or_insert(0) += 1;
                self.missed.push(target.clone());
            }
        }
    }

    #[must_use]
    pub fn losses(&self) -> usize {
        self.games - self.wins
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    /// Mean attempts over won games only
    #[must_use]
    pub fn mean_attempts(&self) -> f64 {
        if self.wins == 0 {
            0.0
        } else {
            self.attempts_on_wins as f64 / self.wins as f64
        }
    }

    /// Mean total reward over episodes that ran to completion
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        let completed = self.games - self.contradictions;
        if completed == 0 {
            0.0
        } else {
            self.total_reward / completed as f64
        }
    }

    #[must_use]
    pub fn count_for(&self, attempts: usize) -> usize {
        self.distribution.get(&attempts).copied().unwrap_or(0)
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// Run `factory`'s strategy against every target
///
/// # Errors
/// `EngineError::EmptyCorpus` when there is nothing to play against.
///
/// # Examples
/// ```
/// use wordle_voi::commands::{EvaluationConfig, run_evaluation};
/// use wordle_voi::core::Word;
/// use wordle_voi::solver::{RewardConfig, StrategyKind};
///
/// let corpus: Vec<Word> = ["crane", "slate", "trace", "plane"]
///     .iter()
///     .map(|w| Word::new(*w).unwrap())
///     .collect();
/// let config = EvaluationConfig { seed: Some(7), show_progress: false, ..Default::default() };
///
/// let summary = run_evaluation(
///     |seed| StrategyKind::Css.build(RewardConfig::default(), seed),
///     &corpus,
///     &corpus,
///     &config,
/// )
/// .unwrap();
/// assert_eq!(summary.games, 4);
/// assert_eq!(summary.wins, 4);
/// ```
pub fn run_evaluation<F, S>(
    factory: F,
    corpus: &[Word],
    targets: &[Word],
    config: &EvaluationConfig,
) -> Result<EvaluationSummary, EngineError>
where
    F: Fn(Option<u64>) -> S + Sync,
    S: Strategy,
{
    if corpus.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }

    let targets = &targets[..config.limit.unwrap_or(targets.len()).min(targets.len())];
    let pb = progress_bar(targets.len(), config.show_progress);
    pb.set_message("Evaluating");

    let start = Instant::now();
    let outcomes: Vec<(String, Result<EpisodeReport, EngineError>)> = targets
        .par_iter()
        .enumerate()
        .map(|(idx, target)| {
            let seed = config.seed.map(|s| s.wrapping_add(idx as u64));
            let mut strategy = factory(seed);
            let outcome = run_episode(&mut strategy, corpus, target, config.environment, &mut NullSink);
            pb.inc(1);
            (strategy.name().to_string(), outcome)
        })
        .collect();
    pb.finish_with_message("Complete!");

    let name = outcomes.first().map(|(name, _)| name.clone()).unwrap_or_default();
    let mut summary = EvaluationSummary::new(name, config.environment.max_attempts + 1);
    for (target, (_, outcome)) in targets.iter().zip(&outcomes) {
        summary.add(target, outcome);
    }
    summary.duration = start.elapsed();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Observation, Pattern};
    use crate::solver::{RewardConfig, StrategyKind};

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    fn quiet(seed: u64) -> EvaluationConfig {
        EvaluationConfig {
            seed: Some(seed),
            show_progress: false,
            ..EvaluationConfig::default()
        }
    }

    /// Always plays the same non-corpus word and keeps every candidate
    struct Fixed;

    impl Strategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn update_belief(&mut self, candidates: &[Word], _guess: &Word, _feedback: Pattern) -> Vec<Word> {
            candidates.to_vec()
        }

        fn select_guess(&mut self, _candidates: &[Word], _history: &[Observation]) -> Option<Word> {
            Word::new("zzzzz").ok()
        }
    }

    #[test]
    fn distribution_sums_to_games() {
        let corpus = words(&["irate", "crate", "grate", "plate", "slate", "crane"]);
        let summary = run_evaluation(
            |seed| StrategyKind::Random.build(RewardConfig::default(), seed),
            &corpus,
            &corpus,
            &quiet(3),
        )
        .unwrap();

        let total: usize = (1..=7).map(|a| summary.count_for(a)).sum();
        assert_eq!(total, summary.games);
        assert_eq!(summary.games, corpus.len());
        assert_eq!(summary.wins, corpus.len());
        assert!((summary.win_rate() - 1.0).abs() < f64::EPSILON);
        assert!((1.0..=6.0).contains(&summary.mean_attempts()));
        assert_eq!(summary.strategy, "random");
    }

    #[test]
    fn losses_land_in_sentinel_bucket() {
        let corpus = words(&["crane", "slate", "trace"]);
        let summary = run_evaluation(|_| Fixed, &corpus, &corpus, &quiet(0)).unwrap();

        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses(), 3);
        assert_eq!(summary.count_for(EpisodeReport::LOSS_SENTINEL), 3);
        assert_eq!(summary.missed, corpus);
        assert!(summary.mean_attempts().abs() < f64::EPSILON);
        // Six penalty-only attempts: -1 × (1 + 1.5 + 2 + 2.5 + 3 + 3.5)
        assert!((summary.mean_reward() + 13.5).abs() < 1e-9);
    }

    #[test]
    fn contradictions_are_counted() {
        let corpus = words(&["crane", "slate"]);
        let mut summary = EvaluationSummary::new("x".into(), 7);
        summary.add(&corpus[0], &Err(EngineError::NoCandidates { attempt: 3 }));

        assert_eq!(summary.games, 1);
        assert_eq!(summary.contradictions, 1);
        assert_eq!(summary.count_for(7), 1);
        assert!(summary.mean_reward().abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let corpus = words(&[
            "crane", "slate", "trace", "plane", "irate", "crate", "grate", "plate", "stare", "share",
        ]);
        let run = || {
            run_evaluation(
                |seed| StrategyKind::Voi.build(RewardConfig::default(), seed),
                &corpus,
                &corpus,
                &quiet(42),
            )
            .unwrap()
        };
        let (a, b) = (run(), run());

        assert_eq!(a.wins, b.wins);
        assert_eq!(a.attempts_on_wins, b.attempts_on_wins);
        assert!((a.total_reward - b.total_reward).abs() < 1e-9);
    }

    #[test]
    fn limit_truncates_targets() {
        let corpus = words(&["crane", "slate", "trace", "plane"]);
        let config = EvaluationConfig {
            limit: Some(2),
            ..quiet(1)
        };
        let summary = run_evaluation(
            |seed| StrategyKind::Css.build(RewardConfig::default(), seed),
            &corpus,
            &corpus,
            &config,
        )
        .unwrap();
        assert_eq!(summary.games, 2);
    }

    #[test]
    fn factory_runs_once_per_target() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let corpus = words(&["crane", "slate", "trace", "plane"]);
        let built = AtomicUsize::new(0);
        let summary = run_evaluation(
            |seed| {
                built.fetch_add(1, Ordering::Relaxed);
                StrategyKind::Css.build(RewardConfig::default(), seed)
            },
            &corpus,
            &corpus,
            &quiet(4),
        )
        .unwrap();

        assert_eq!(built.load(Ordering::Relaxed), corpus.len());
        assert_eq!(summary.strategy, "css");
    }

    #[test]
    fn no_targets_give_empty_summary() {
        let corpus = words(&["crane"]);
        let summary = run_evaluation(|_| Fixed, &corpus, &[], &quiet(0)).unwrap();

        assert_eq!(summary.games, 0);
        assert!(summary.strategy.is_empty());
        assert!(summary.win_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let targets = words(&["crane"]);
        let result = run_evaluation(|_| Fixed, &[], &targets, &quiet(0));
        assert!(matches!(result, Err(EngineError::EmptyCorpus)));
    }
}
