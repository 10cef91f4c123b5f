//! Episode execution
//!
//! The environment that scores guesses against a hidden target, the driver
//! that runs a strategy through one episode, and the telemetry it emits.

mod environment;
mod episode;
pub mod metrics;
mod telemetry;

pub use environment::{Environment, EnvironmentConfig, EpisodeStatus, StepOutcome};
pub use episode::{EpisodeReport, run_episode};
pub use telemetry::{AttemptRecord, NullSink, TelemetrySink};
