//! Core domain types for Wordle
//!
//! Words, feedback patterns and the pattern cache. Everything here is pure
//! apart from the cache's own memo table.

mod cache;
mod observation;
mod pattern;
mod word;

pub use cache::FeedbackCache;
pub use observation::{Observation, already_guessed};
pub use pattern::{Mark, Pattern};
pub use word::{WORD_LENGTH, Word, WordError, letter_index};
