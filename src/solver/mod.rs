//! Wordle solving algorithms
//!
//! Candidate filtering, the belief engine and the interchangeable guess
//! selection strategies built on them.

pub mod belief;
pub mod constraints;
pub mod css;
pub mod filter;
pub mod hybrid;
pub mod provider;
pub mod strategy;
pub mod voi;

pub use belief::{BeliefConfig, BeliefEngine, MatchScoring};
pub use constraints::{ConstraintTracker, ConstraintViolations, violations_against};
pub use css::{CssConfig, CssStrategy};
pub use filter::{filter_by_feedback_str, filter_candidates, filter_history, is_consistent};
pub use hybrid::{HybridStrategy, Schedule, Side};
pub use provider::{GuessProvider, ProviderError, ProviderStrategy};
pub use strategy::{
    PureRandomStrategy, RandomStrategy, RewardConfig, Strategy, StrategyKind, StrategyType,
};
pub use voi::{VoiConfig, VoiStrategy};
