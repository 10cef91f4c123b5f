//! Entropy plus expected reward over a uniform sample
//!
//! Each attempt samples up to `sample_size` candidates, used both as the
//! guesses to evaluate and as the population to partition. The score of a
//! guess is the plain entropy of its pattern-group sizes over that sample plus
//! `reward_weight` times its expected reward. Sampling trades optimality for
//! speed: the best guess over the whole pool may not be in the sample.

use super::belief::entropy_of_masses;
use super::filter::filter_candidates;
use super::strategy::{RewardConfig, Strategy, make_rng};
use crate::core::{Observation, Pattern, Word};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::warn;

/// CSS tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssConfig {
    /// Maximum number of candidates sampled per attempt
    pub sample_size: usize,
    /// Weight of the expected-reward term
    pub reward_weight: f64,
}

impl CssConfig {
    #[must_use]
    pub const fn new(sample_size: usize, reward_weight: f64) -> Self {
        Self {
            sample_size,
            reward_weight,
        }
    }
}

impl Default for CssConfig {
    fn default() -> Self {
        Self::new(100, 0.5)
    }
}

pub struct CssStrategy {
    config: CssConfig,
    rewards: RewardConfig,
    rng: StdRng,
}

impl CssStrategy {
    #[must_use]
    pub fn new(config: CssConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            rewards: RewardConfig::default(),
            rng: make_rng(seed),
        }
    }

    /// Expected reward of playing `guess` with `candidates` remaining
    ///
    /// With at most one candidate the guess is assumed to win. Otherwise the
    /// attempt penalty, plus the success reward weighted by 1/|candidates| when
    /// the guess is itself a candidate.
    #[must_use]
    pub fn expected_reward(&self, guess: &Word, candidates: &[Word]) -> f64 {
        let RewardConfig {
            attempt_penalty,
            success_reward,
        } = self.rewards;

        if candidates.len() <= 1 {
            return success_reward + attempt_penalty;
        }

        if candidates.contains(guess) {
            attempt_penalty + success_reward / candidates.len() as f64
        } else {
            attempt_penalty
        }
    }

    /// Score of `guess`: sample entropy plus weighted expected reward
    #[must_use]
    pub fn score(&self, guess: &Word, sample: &[Word], candidates: &[Word]) -> f64 {
        sample_entropy(guess, sample)
            + self.config.reward_weight * self.expected_reward(guess, candidates)
    }
}

/// Size of each feedback group `guess` splits `sample` into
fn pattern_counts(guess: &Word, sample: &[Word]) -> FxHashMap<Pattern, usize> {
    let mut counts = FxHashMap::default();
    for answer in sample {
        *counts.entry(Pattern::calculate(guess, answer)).or_insert(0) += 1;
    }
    counts
}

/// Entropy in bits of the feedback groups, every sampled word equally likely
fn sample_entropy(guess: &Word, sample: &[Word]) -> f64 {
    let sizes: Vec<f64> = pattern_counts(guess, sample)
        .into_values()
        .map(|n| n as f64)
        .collect();
    entropy_of_masses(&sizes)
}

impl Default for CssStrategy {
    fn default() -> Self {
        Self::new(CssConfig::default(), None)
    }
}

impl Strategy for CssStrategy {
    fn name(&self) -> &str {
        "css"
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        filter_candidates(candidates, guess, feedback)
    }

    fn select_guess(&mut self, candidates: &[Word], _history: &[Observation]) -> Option<Word> {
        match candidates {
            [] => {
                warn!(strategy = "css", "no candidates left to guess from");
                return None;
            }
            [only] => return Some(only.clone()),
            _ => {}
        }

        let amount = candidates.len().min(self.config.sample_size);
        let sample: Vec<Word> = candidates
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect();

        let scores: Vec<f64> = sample
            .par_iter()
            .map(|guess| self.score(guess, &sample, candidates))
            .collect();

        // First-seen best wins ties
        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in scores.iter().enumerate() {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| sample[idx].clone())
    }

    fn set_rewards(&mut self, rewards: RewardConfig) {
        self.rewards = rewards;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    #[test]
    fn empty_and_single() {
        let mut css = CssStrategy::new(CssConfig::default(), Some(0));
        assert!(css.select_guess(&[], &[]).is_none());

        let one = words(&["crane"]);
        assert_eq!(css.select_guess(&one, &[]), Some(one[0].clone()));
    }

    #[test]
    fn sample_entropy_of_full_split_is_log_size() {
        // CRANE gives each of these a distinct pattern
        let sample = words(&["crane", "slate", "trace", "robot"]);
        let guess = Word::new("crane").unwrap();

        assert_eq!(pattern_counts(&guess, &sample).len(), 4);
        assert!((sample_entropy(&guess, &sample) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sample_entropy_of_uninformative_guess_is_zero() {
        let sample = words(&["crane", "slate", "trace", "plane"]);
        let guess = Word::new("zzzzz").unwrap();

        let counts = pattern_counts(&guess, &sample);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&Pattern::new(0)), Some(&4));
        assert!(sample_entropy(&guess, &sample).abs() < 1e-12);
    }

    #[test]
    fn sample_entropy_weights_groups_by_size() {
        let sample = words(&["irate", "crate", "grate", "slate"]);
        let guess = Word::new("slate").unwrap();

        // IRATE, CRATE and GRATE all give --GGG, SLATE gives GGGGG
        let counts = pattern_counts(&guess, &sample);
        assert_eq!(counts.len(), 2);
        let expected = -(0.75_f64 * 0.75_f64.log2() + 0.25 * 0.25_f64.log2());
        assert!((sample_entropy(&guess, &sample) - expected).abs() < 1e-9);
    }

    #[test]
    fn expected_reward_model() {
        let css = CssStrategy::new(CssConfig::default(), Some(0));
        let candidates = words(&["irate", "crate", "grate", "plate"]);

        let inside = css.expected_reward(&candidates[0], &candidates);
        assert!((inside - (-1.0 + 10.0 / 4.0)).abs() < 1e-12);

        let outside = css.expected_reward(&Word::new("zzzzz").unwrap(), &candidates);
        assert!((outside + 1.0).abs() < 1e-12);

        let single = css.expected_reward(&candidates[0], &candidates[..1]);
        assert!((single - 9.0).abs() < 1e-12);
    }

    #[test]
    fn custom_rewards_apply() {
        let mut css = CssStrategy::new(CssConfig::default(), Some(0));
        css.set_rewards(RewardConfig::new(-2.0, 20.0));
        let candidates = words(&["irate", "crate"]);

        let reward = css.expected_reward(&candidates[0], &candidates);
        assert!((reward - 8.0).abs() < 1e-12);
    }

    #[test]
    fn picks_a_top_scoring_guess_when_fully_sampled() {
        let candidates = words(&["crane", "crate", "grate", "irate", "trace"]);
        let mut css = CssStrategy::new(CssConfig::default(), Some(11));

        let best_score = candidates
            .iter()
            .map(|g| css.score(g, &candidates, &candidates))
            .fold(f64::NEG_INFINITY, f64::max);

        let chosen = css.select_guess(&candidates, &[]).unwrap();
        assert!(candidates.contains(&chosen));
        assert!((css.score(&chosen, &candidates, &candidates) - best_score).abs() < 1e-12);
    }

    #[test]
    fn sample_is_capped() {
        let candidates = words(&["irate", "crate", "grate", "plate", "slate", "crane"]);
        let mut css = CssStrategy::new(CssConfig::new(2, 0.5), Some(5));

        for _ in 0..10 {
            let guess = css.select_guess(&candidates, &[]).unwrap();
            assert!(candidates.contains(&guess));
        }
    }

    #[test]
    fn seeded_runs_agree() {
        let candidates = words(&["irate", "crate", "grate", "plate", "slate", "crane", "trace"]);
        let mut a = CssStrategy::new(CssConfig::new(3, 0.5), Some(99));
        let mut b = CssStrategy::new(CssConfig::new(3, 0.5), Some(99));

        for _ in 0..5 {
            assert_eq!(
                a.select_guess(&candidates, &[]),
                b.select_guess(&candidates, &[])
            );
        }
    }
}
