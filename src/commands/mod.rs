//! Command implementations

pub mod evaluate;
pub mod play;

pub use evaluate::{EvaluationConfig, EvaluationSummary, run_evaluation};
pub use play::{PlayResult, play_target};
