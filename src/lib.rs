//! Wordle VOI
//!
//! Belief-update and guess-selection engine for evaluating Wordle strategies:
//! entropy sampling, value of information over a belief distribution, random
//! baselines and hybrids of any two of them.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_voi::core::{Pattern, Word};
//! use wordle_voi::solver::filter_candidates;
//!
//! let corpus: Vec<Word> = ["crane", "slate", "trace", "plane"]
//!     .iter()
//!     .map(|w| Word::new(*w).unwrap())
//!     .collect();
//!
//! let guess = Word::new("crane").unwrap();
//! let feedback = Pattern::calculate(&guess, &Word::new("trace").unwrap());
//! assert_eq!(feedback.to_string(), "YGG-G");
//!
//! let remaining = filter_candidates(&corpus, &guess, feedback);
//! assert_eq!(remaining, vec![Word::new("trace").unwrap()]);
//! ```

// Core domain types
pub mod core;

// Filtering, belief and guess selection
pub mod solver;

// Episode environment and driver
pub mod game;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub mod error;
