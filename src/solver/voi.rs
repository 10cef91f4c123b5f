//! Value-of-information strategy
//!
//! Keeps a `BeliefEngine` across the attempts of an episode. The opening
//! guess comes from a letter-frequency heuristic over a random sample; ties
//! are broken at random so no single canonical opener emerges. Later guesses
//! weigh belief-weighted information gain against expected reward, shifting
//! from the former to the latter as attempts run out.

use super::belief::{BeliefConfig, BeliefEngine, entropy_of_masses};
use super::strategy::{RewardConfig, Strategy, make_rng};
use crate::core::{
    FeedbackCache, Observation, Pattern, WORD_LENGTH, Word, already_guessed, letter_index,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// VOI tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiConfig {
    /// Words scored by the opening heuristic
    pub opening_sample: usize,
    /// Candidates evaluated per later attempt
    pub sample_size: usize,
    /// Penalty per unit share of the largest pattern group
    pub diversity_weight: f64,
    /// Weight of expected reward in the exploitation term
    pub reward_weight: f64,
    /// Bonus for guessing a live candidate, scaled by (1 - exploration)
    pub candidate_bonus: f64,
    /// Lower bound of the exploration factor
    pub exploration_floor: f64,
    /// Attempts in an episode; exploration decays linearly toward this
    pub max_attempts: usize,
    pub belief: BeliefConfig,
}

impl Default for VoiConfig {
    fn default() -> Self {
        Self {
            opening_sample: 500,
            sample_size: 200,
            diversity_weight: 0.1,
            reward_weight: 0.5,
            candidate_bonus: 0.5,
            exploration_floor: 0.2,
            max_attempts: 6,
            belief: BeliefConfig::default(),
        }
    }
}

impl VoiConfig {
    /// Exploration weight for `attempt` (1-based): `max(floor, 1 - attempt/max)`
    #[must_use]
    pub fn exploration_factor(&self, attempt: usize) -> f64 {
        let progress = attempt as f64 / self.max_attempts.max(1) as f64;
        (1.0 - progress).max(self.exploration_floor)
    }
}

pub struct VoiStrategy {
    config: VoiConfig,
    rewards: RewardConfig,
    belief: BeliefEngine,
    cache: FeedbackCache,
    rng: StdRng,
    attempt: usize,
}

/// Pattern partition of the candidates with each group's belief mass
struct Partition {
    groups: FxHashMap<Pattern, Vec<f64>>,
    largest: usize,
}

impl VoiStrategy {
    #[must_use]
    pub fn new(config: VoiConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            rewards: RewardConfig::default(),
            belief: BeliefEngine::new(config.belief),
            cache: FeedbackCache::new(),
            rng: make_rng(seed),
            attempt: 0,
        }
    }

    #[must_use]
    pub const fn belief(&self) -> &BeliefEngine {
        &self.belief
    }

    /// Attempt number seen by the last `select_guess` (1-based, 0 before any)
    #[must_use]
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    fn partition(&mut self, guess: &Word, candidates: &[Word]) -> Partition {
        let mut groups: FxHashMap<Pattern, Vec<f64>> = FxHashMap::default();
        for target in candidates {
            let pattern = self.cache.pattern(guess, target);
            groups
                .entry(pattern)
                .or_default()
                .push(self.belief.mass(target));
        }
        let largest = groups.values().map(Vec::len).max().unwrap_or(0);
        Partition { groups, largest }
    }

    /// Belief entropy before the guess minus expected entropy after, less the
    /// diversity penalty
    ///
    /// Zero when at most one candidate remains.
    pub fn value_of_information(&mut self, guess: &Word, candidates: &[Word]) -> f64 {
        if candidates.len() <= 1 {
            return 0.0;
        }
        let partition = self.partition(guess, candidates);
        self.voi_from_partition(&partition, candidates)
    }

    fn voi_from_partition(&self, partition: &Partition, candidates: &[Word]) -> f64 {
        let before = self.belief.entropy(candidates);
        let after: f64 = partition
            .groups
            .values()
            .map(|masses| masses.iter().sum::<f64>() * entropy_of_masses(masses))
            .sum();
        let diversity =
            self.config.diversity_weight * partition.largest as f64 / candidates.len() as f64;

        before - after - diversity
    }

    /// Attempt penalty plus success reward weighted by the mass of the group
    /// that contains the guess itself
    pub fn expected_reward(&mut self, guess: &Word, candidates: &[Word]) -> f64 {
        if candidates.len() <= 1 {
            return self.rewards.success_reward + self.rewards.attempt_penalty;
        }
        let partition = self.partition(guess, candidates);
        self.reward_from_partition(&partition)
    }

    fn reward_from_partition(&self, partition: &Partition) -> f64 {
        // Only the all-exact group can contain the guess
        let win_mass: f64 = partition
            .groups
            .get(&Pattern::PERFECT)
            .map_or(0.0, |masses| masses.iter().sum());

        self.rewards.attempt_penalty + win_mass * self.rewards.success_reward
    }

    /// Letter-frequency score used for the opening guess
    ///
    /// Each new letter adds 3× its corpus frequency, every position adds half
    /// its positional frequency, and five distinct letters add 0.5.
    #[must_use]
    pub fn opening_score(&self, word: &Word) -> f64 {
        let mut seen = [false; 26];
        let mut distinct = 0;
        let mut score = 0.0;

        for (pos, &ch) in word.chars().iter().enumerate() {
            let idx = letter_index(ch);
            if !seen[idx] {
                seen[idx] = true;
                distinct += 1;
                score += self.belief.letter_frequency(ch) * 3.0;
            }
            score += self.belief.position_frequency(pos, ch) * 0.5;
        }

        if distinct == WORD_LENGTH {
            score += 0.5;
        }
        score
    }

    fn select_opening(&mut self, candidates: &[Word]) -> Option<Word> {
        let amount = candidates.len().min(self.config.opening_sample);
        let sample: Vec<&Word> = candidates.choose_multiple(&mut self.rng, amount).collect();

        let mut best_score = f64::NEG_INFINITY;
        let mut best: Vec<&Word> = Vec::new();
        for word in sample {
            let score = self.opening_score(word);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(word);
            } else if (score - best_score).abs() <= f64::EPSILON {
                best.push(word);
            }
        }

        best.choose(&mut self.rng)
            .map(|&w| w.clone())
            .or_else(|| candidates.first().cloned())
    }

    fn select_most_likely(&self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        let unplayed = candidates
            .iter()
            .filter(|w| !already_guessed(history, w))
            .max_by(|a, b| self.belief.mass(a).total_cmp(&self.belief.mass(b)));

        unplayed
            .or_else(|| {
                candidates
                    .iter()
                    .max_by(|a, b| self.belief.mass(a).total_cmp(&self.belief.mass(b)))
            })
            .cloned()
    }
}

impl Default for VoiStrategy {
    fn default() -> Self {
        Self::new(VoiConfig::default(), None)
    }
}

impl Strategy for VoiStrategy {
    fn name(&self) -> &str {
        "voi"
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        self.belief.update(candidates, guess, feedback)
    }

    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        if candidates.is_empty() {
            warn!(strategy = "voi", "no candidates left to guess from");
            return None;
        }
        if !self.belief.is_initialized() {
            self.belief.initialize(candidates);
        }

        self.attempt = history.len() + 1;

        if history.is_empty() {
            return self.select_opening(candidates);
        }

        if candidates.len() <= 2 {
            return self.select_most_likely(candidates, history);
        }

        let exploration = self.config.exploration_factor(self.attempt);
        let amount = candidates.len().min(self.config.sample_size);
        let sample: Vec<Word> = candidates
            .choose_multiple(&mut self.rng, amount)
            .filter(|w| !already_guessed(history, w))
            .cloned()
            .collect();

        let mut best: Option<(Word, f64)> = None;
        for guess in sample {
            let partition = self.partition(&guess, candidates);
            let voi = self.voi_from_partition(&partition, candidates);
            let reward = self.reward_from_partition(&partition);

            let mut score = exploration * voi
                + (1.0 - exploration) * self.config.reward_weight * reward;
            // Sampled from the candidates, so always a live candidate
            score += self.config.candidate_bonus * (1.0 - exploration);

            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((guess, score));
            }
        }

        if let Some((guess, score)) = best {
            let (cache_hits, cache_misses) = self.cache.stats();
            debug!(
                attempt = self.attempt,
                guess = %guess,
                score,
                candidates = candidates.len(),
                cache_hits,
                cache_misses,
                "voi selected guess"
            );
            return Some(guess);
        }

        candidates
            .iter()
            .find(|w| !already_guessed(history, w))
            .or_else(|| candidates.first())
            .cloned()
    }

    fn set_rewards(&mut self, rewards: RewardConfig) {
        self.rewards = rewards;
    }

    fn reset(&mut self) {
        self.belief.clear();
        self.attempt = 0;
    }
}
