//! Single-target play
//!
//! Runs one episode against a chosen target and keeps the full attempt trace.

use crate::core::Word;
use crate::error::EngineError;
use crate::game::{AttemptRecord, EnvironmentConfig, EpisodeReport, run_episode};
use crate::solver::Strategy;

/// Episode outcome plus its per-attempt records
#[derive(Debug, Clone)]
pub struct PlayResult {
    pub report: EpisodeReport,
    pub records: Vec<AttemptRecord>,
}

impl PlayResult {
    /// Total bits gained across all attempts
    #[must_use]
    pub fn information_gained(&self) -> f64 {
        self.records.iter().map(AttemptRecord::information_gain).sum()
    }
}

/// Play `target` with `strategy` over `corpus`
///
/// # Errors
///
/// Returns an error if:
/// - The target is not a valid five-letter word
/// - The corpus is empty
/// - The strategy runs out of candidates
pub fn play_target<S: Strategy + ?Sized>(
    strategy: &mut S,
    corpus: &[Word],
    target: &str,
    config: EnvironmentConfig,
) -> Result<PlayResult, EngineError> {
    let target = Word::new(target)?;
    let mut records: Vec<AttemptRecord> = Vec::new();
    let report = run_episode(strategy, corpus, &target, config, &mut records)?;
    Ok(PlayResult { report, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use crate::solver::{RewardConfig, StrategyKind};

    fn corpus() -> Vec<Word> {
        ["crane", "slate", "trace", "plane"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect()
    }

    #[test]
    fn trace_ends_with_target() {
        let mut strategy = StrategyKind::Voi.build(RewardConfig::default(), Some(11));
        let result = play_target(&mut strategy, &corpus(), "trace", EnvironmentConfig::default()).unwrap();

        assert!(result.report.solved);
        assert_eq!(result.records.len(), result.report.attempts);
        let last = result.records.last().unwrap();
        assert_eq!(last.guess.text(), "TRACE");
        assert_eq!(last.feedback, Pattern::PERFECT);
        assert!(result.information_gained() >= 0.0);
    }

    #[test]
    fn invalid_target_is_rejected() {
        let mut strategy = StrategyKind::Css.build(RewardConfig::default(), Some(1));
        let result = play_target(&mut strategy, &corpus(), "toolong", EnvironmentConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidWord(_))));
    }

    #[test]
    fn lowercase_target_is_accepted() {
        let mut strategy = StrategyKind::Random.build(RewardConfig::default(), Some(2));
        let result = play_target(&mut strategy, &corpus(), "plane", EnvironmentConfig::default()).unwrap();
        assert_eq!(result.report.target.text(), "PLANE");
    }
}
