//! Formatting utilities for terminal output

use crate::core::{Mark, Pattern, Word};
use colored::{ColoredString, Colorize};

/// Render one letter as a colored tile
#[must_use]
pub fn tile(letter: char, mark: Mark) -> ColoredString {
    let text = format!(" {letter} ");
    match mark {
        Mark::Exact => text.black().on_green().bold(),
        Mark::Partial => text.black().on_yellow().bold(),
        Mark::Absent => text.white().on_bright_black(),
    }
}

/// Render a guess with its feedback as a row of tiles
#[must_use]
pub fn colored_guess(guess: &Word, pattern: Pattern) -> String {
    guess
        .text()
        .chars()
        .zip(pattern.marks())
        .map(|(letter, mark)| tile(letter, mark).to_string())
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_guess_keeps_letter_order() {
        colored::control::set_override(false);
        let guess = Word::new("crane").unwrap();
        let row = colored_guess(&guess, Pattern::parse("YGG-G").unwrap());
        assert_eq!(row, " C  R  A  N  E ");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
