//! Belief distribution over the remaining candidates
//!
//! Mass starts uniform over the corpus it is initialized with. Letter and
//! position frequency tables are computed at the same time; they never seed the
//! mass itself, they only drive the opening heuristic and the update bonus.

use crate::core::{Mark, Pattern, WORD_LENGTH, Word, letter_index};
use rustc_hash::FxHashMap;

/// How surviving candidates are scored against the observed feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchScoring {
    /// Only candidates that reproduce the feedback survive (default)
    Exact,
    /// Every candidate survives; near-misses keep reduced mass
    ///
    /// Score = 0.1 + weighted counts of matching mark types, capped at 1.0.
    Fuzzy {
        exact_weight: f64,
        partial_weight: f64,
        absent_weight: f64,
    },
}

impl MatchScoring {
    /// Fuzzy scoring with the stock weights
    #[must_use]
    pub const fn fuzzy() -> Self {
        Self::Fuzzy {
            exact_weight: 0.3,
            partial_weight: 0.05,
            absent_weight: 0.0,
        }
    }
}

/// Belief engine tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeliefConfig {
    /// Scale of the common-letter bonus applied at EXACT positions
    pub letter_freq_multiplier: f64,
    pub scoring: MatchScoring,
}

impl BeliefConfig {
    #[must_use]
    pub const fn new(letter_freq_multiplier: f64, scoring: MatchScoring) -> Self {
        Self {
            letter_freq_multiplier,
            scoring,
        }
    }
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self::new(1.0, MatchScoring::Exact)
    }
}

const MATCH_BASE_SCORE: f64 = 0.1;

/// Probability mass over candidate words plus corpus frequency tables
#[derive(Debug, Clone, Default)]
pub struct BeliefEngine {
    config: BeliefConfig,
    mass: FxHashMap<Word, f64>,
    letter_freq: [f64; 26],
    position_freq: [[f64; 26]; WORD_LENGTH],
    initialized: bool,
}

impl BeliefEngine {
    #[must_use]
    pub fn new(config: BeliefConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reset mass to uniform over `corpus` and rebuild the frequency tables
    ///
    /// Frequencies are occurrence counts divided by the number of words, so a
    /// letter's overall frequency can exceed 1.0 when it repeats often.
    pub fn initialize(&mut self, corpus: &[Word]) {
        self.mass.clear();
        self.letter_freq = [0.0; 26];
        self.position_freq = [[0.0; 26]; WORD_LENGTH];
        self.initialized = true;

        if corpus.is_empty() {
            return;
        }

        for word in corpus {
            for (pos, &ch) in word.chars().iter().enumerate() {
                let idx = letter_index(ch);
                self.letter_freq[idx] += 1.0;
                self.position_freq[pos][idx] += 1.0;
            }
        }

        let total = corpus.len() as f64;
        for freq in &mut self.letter_freq {
            *freq /= total;
        }
        for table in &mut self.position_freq {
            for freq in table.iter_mut() {
                *freq /= total;
            }
        }

        let uniform = 1.0 / total;
        self.mass = corpus.iter().map(|w| (w.clone(), uniform)).collect();
    }

    /// Forget all mass and frequencies
    pub fn clear(&mut self) {
        *self = Self::new(self.config);
    }

    /// Filter and reweight after observing `feedback` for `guess`
    ///
    /// Initializes lazily from `candidates` on first use. Returns the surviving
    /// candidates in input order; mass for everything else is dropped. If the
    /// surviving weights sum to zero the survivors get uniform mass, and an
    /// empty result leaves an empty distribution.
    pub fn update(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        if !self.initialized {
            self.initialize(candidates);
        }

        let mut survivors = Vec::with_capacity(candidates.len());
        let mut weights = Vec::with_capacity(candidates.len());

        for word in candidates {
            let expected = Pattern::calculate(guess, word);
            let score = match self.config.scoring {
                MatchScoring::Exact if expected != feedback => continue,
                MatchScoring::Exact => 1.0,
                MatchScoring::Fuzzy { .. } => self.match_score(expected, feedback),
            };

            let mut weight = self.mass(word) * score;
            for pos in 0..WORD_LENGTH {
                let mark = feedback.mark(pos);
                if mark == Mark::Exact && expected.mark(pos) == mark {
                    let letter = guess.char_at(pos);
                    weight *= self
                        .config
                        .letter_freq_multiplier
                        .mul_add(self.letter_frequency(letter), 1.0);
                }
            }

            survivors.push(word.clone());
            weights.push(weight);
        }

        let total: f64 = weights.iter().sum();
        self.mass.clear();
        if total > 0.0 {
            self.mass.extend(
                survivors
                    .iter()
                    .cloned()
                    .zip(weights.iter().map(|w| w / total)),
            );
        } else if !survivors.is_empty() {
            let uniform = 1.0 / survivors.len() as f64;
            self.mass
                .extend(survivors.iter().map(|w| (w.clone(), uniform)));
        }

        survivors
    }

    /// Similarity between the pattern a candidate would produce and the one observed
    ///
    /// 1.0 for identical patterns. Otherwise a base of 0.1 plus the configured
    /// weight per matching mark-type count, capped at 1.0. Under
    /// `MatchScoring::Exact` non-identical patterns score 0.0.
    #[must_use]
    pub fn match_score(&self, expected: Pattern, actual: Pattern) -> f64 {
        if expected == actual {
            return 1.0;
        }
        let MatchScoring::Fuzzy {
            exact_weight,
            partial_weight,
            absent_weight,
        } = self.config.scoring
        else {
            return 0.0;
        };

        let shared = |mark: Mark| expected.count(mark).min(actual.count(mark)) as f64;
        let score = MATCH_BASE_SCORE
            + exact_weight * shared(Mark::Exact)
            + partial_weight * shared(Mark::Partial)
            + absent_weight * shared(Mark::Absent);
        score.min(1.0)
    }

    /// Current mass of `word`, 0.0 if unknown or eliminated
    #[inline]
    #[must_use]
    pub fn mass(&self, word: &Word) -> f64 {
        self.mass.get(word).copied().unwrap_or(0.0)
    }

    /// Shannon entropy in bits of the belief restricted to `candidates`
    ///
    /// Masses are renormalized over the supplied list, so the result is 0.0
    /// when a single candidate holds all the mass and never exceeds
    /// log₂(|candidates|).
    #[must_use]
    pub fn entropy(&self, candidates: &[Word]) -> f64 {
        let masses: Vec<f64> = candidates.iter().map(|w| self.mass(w)).collect();
        entropy_of_masses(&masses)
    }

    /// Overall frequency of `letter` in the initializing corpus
    #[inline]
    #[must_use]
    pub fn letter_frequency(&self, letter: u8) -> f64 {
        self.letter_freq[letter_index(letter)]
    }

    /// Frequency of `letter` at `position` in the initializing corpus
    #[inline]
    #[must_use]
    pub fn position_frequency(&self, position: usize, letter: u8) -> f64 {
        self.position_freq[position][letter_index(letter)]
    }

    /// Number of words currently holding mass
    #[must_use]
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
}

/// Shannon entropy of unnormalized non-negative masses
pub(crate) fn entropy_of_masses(masses: &[f64]) -> f64 {
    let total: f64 = masses.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    masses
        .iter()
        .filter(|&&m| m > 0.0)
        .map(|&m| {
            let p = m / total;
            -p * p.log2()
        })
        .sum()
}
