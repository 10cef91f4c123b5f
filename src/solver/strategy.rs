//! Guess selection strategies
//!
//! Defines the Strategy trait, the reward model every strategy shares, the
//! random baselines and the enum used for runtime selection.

use super::css::{CssConfig, CssStrategy};
use super::filter::filter_candidates;
use super::hybrid::{HybridStrategy, Schedule};
use super::voi::{VoiConfig, VoiStrategy};
use crate::core::{Observation, Pattern, Word};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::str::FromStr;

/// Reward model used by the expected-reward terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardConfig {
    /// Cost of making one more attempt (negative)
    pub attempt_penalty: f64,
    /// Payoff for guessing the target
    pub success_reward: f64,
}

impl RewardConfig {
    #[must_use]
    pub const fn new(attempt_penalty: f64, success_reward: f64) -> Self {
        Self {
            attempt_penalty,
            success_reward,
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::new(-1.0, 10.0)
    }
}

/// A guess-selection policy
///
/// Strategies own their state (belief, caches, random source). One instance
/// serves one episode at a time; call `reset` between episodes.
pub trait Strategy {
    /// Short name used in reports
    fn name(&self) -> &str;

    /// Observe `feedback` for `guess` and return the candidates still in play
    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word>;

    /// Pick the next guess
    ///
    /// Returns `None` only when there is nothing left to guess from.
    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word>;

    /// Replace the reward model
    fn set_rewards(&mut self, _rewards: RewardConfig) {}

    /// Drop per-episode state
    fn reset(&mut self) {}
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        (**self).update_belief(candidates, guess, feedback)
    }

    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        (**self).select_guess(candidates, history)
    }

    fn set_rewards(&mut self, rewards: RewardConfig) {
        (**self).set_rewards(rewards);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Build a random source from an optional seed
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Random strategy
///
/// Filters by consistency and picks uniformly from the remaining candidates.
/// A lower-bound baseline.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        filter_candidates(candidates, guess, feedback)
    }

    fn select_guess(&mut self, candidates: &[Word], _history: &[Observation]) -> Option<Word> {
        candidates.choose(&mut self.rng).cloned()
    }
}

/// Pure random strategy
///
/// Ignores feedback entirely: the list seen on the first call of an episode is
/// sampled from on every attempt. A sanity-check baseline for an agent that
/// never updates its belief.
pub struct PureRandomStrategy {
    rng: StdRng,
    word_list: Option<Vec<Word>>,
}

impl PureRandomStrategy {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: make_rng(seed),
            word_list: None,
        }
    }
}

impl Default for PureRandomStrategy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Strategy for PureRandomStrategy {
    fn name(&self) -> &str {
        "pure-random"
    }

    fn update_belief(&mut self, candidates: &[Word], _guess: &Word, _feedback: Pattern) -> Vec<Word> {
        candidates.to_vec()
    }

    fn select_guess(&mut self, candidates: &[Word], _history: &[Observation]) -> Option<Word> {
        let list = self.word_list.get_or_insert_with(|| candidates.to_vec());
        list.choose(&mut self.rng).cloned()
    }

    fn reset(&mut self) {
        self.word_list = None;
    }
}

const HYBRID_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Names of the built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Css,
    Voi,
    Random,
    PureRandom,
}

impl StrategyKind {
    pub const ALL: [Self; 4] = [Self::Css, Self::Voi, Self::Random, Self::PureRandom];

    /// Look up a strategy by name
    ///
    /// Supported names: "css", "voi", "random", "pure-random"
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "css" => Some(Self::Css),
            "voi" => Some(Self::Voi),
            "random" => Some(Self::Random),
            "pure-random" | "pure_random" | "purerandom" => Some(Self::PureRandom),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Voi => "voi",
            Self::Random => "random",
            Self::PureRandom => "pure-random",
        }
    }

    /// Instantiate with default tuning and the given reward model
    #[must_use]
    pub fn build(self, rewards: RewardConfig, seed: Option<u64>) -> StrategyType {
        let mut strategy = match self {
            Self::Css => StrategyType::Css(CssStrategy::new(CssConfig::default(), seed)),
            Self::Voi => StrategyType::Voi(Box::new(VoiStrategy::new(VoiConfig::default(), seed))),
            Self::Random => StrategyType::Random(RandomStrategy::new(seed)),
            Self::PureRandom => StrategyType::PureRandom(PureRandomStrategy::new(seed)),
        };
        strategy.set_rewards(rewards);
        strategy
    }

    /// Compose `self` and `other` under `schedule`
    ///
    /// The second side gets its own seed so the two sides never share a
    /// random stream.
    #[must_use]
    pub fn build_hybrid(
        self,
        other: Self,
        schedule: Schedule,
        rewards: RewardConfig,
        seed: Option<u64>,
    ) -> StrategyType {
        let first = self.build(rewards, seed);
        let second = other.build(rewards, seed.map(|s| s.wrapping_add(HYBRID_SEED_OFFSET)));
        StrategyType::Hybrid(Box::new(HybridStrategy::new(
            Box::new(first),
            Box::new(second),
            schedule,
        )))
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("unknown strategy '{s}' (expected css, voi, random or pure-random)")
        })
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Entropy plus expected reward over a uniform sample
    Css(CssStrategy),
    /// Belief-weighted value of information
    Voi(Box<VoiStrategy>),
    /// Uniform choice among consistent candidates
    Random(RandomStrategy),
    /// Uniform choice from the unfiltered list
    PureRandom(PureRandomStrategy),
    /// Two strategies routed by attempt number
    Hybrid(Box<HybridStrategy>),
}

impl Strategy for StrategyType {
    fn name(&self) -> &str {
        match self {
            Self::Css(s) => s.name(),
            Self::Voi(s) => s.name(),
            Self::Random(s) => s.name(),
            Self::PureRandom(s) => s.name(),
            Self::Hybrid(s) => s.name(),
        }
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        match self {
            Self::Css(s) => s.update_belief(candidates, guess, feedback),
            Self::Voi(s) => s.update_belief(candidates, guess, feedback),
            Self::Random(s) => s.update_belief(candidates, guess, feedback),
            Self::PureRandom(s) => s.update_belief(candidates, guess, feedback),
            Self::Hybrid(s) => s.update_belief(candidates, guess, feedback),
        }
    }

    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        match self {
            Self::Css(s) => s.select_guess(candidates, history),
            Self::Voi(s) => s.select_guess(candidates, history),
            Self::Random(s) => s.select_guess(candidates, history),
            Self::PureRandom(s) => s.select_guess(candidates, history),
            Self::Hybrid(s) => s.select_guess(candidates, history),
        }
    }

    fn set_rewards(&mut self, rewards: RewardConfig) {
        match self {
            Self::Css(s) => s.set_rewards(rewards),
            Self::Voi(s) => s.set_rewards(rewards),
            Self::Random(s) => s.set_rewards(rewards),
            Self::PureRandom(s) => s.set_rewards(rewards),
            Self::Hybrid(s) => s.set_rewards(rewards),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Css(s) => s.reset(),
            Self::Voi(s) => s.reset(),
            Self::Random(s) => s.reset(),
            Self::PureRandom(s) => s.reset(),
            Self::Hybrid(s) => s.reset(),
        }
    }
}
