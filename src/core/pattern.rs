//! Wordle feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 encoding:
//! - 0 = Absent (letter not in word)
//! - 1 = Partial (letter in word, wrong position)
//! - 2 = Exact (letter in correct position)
//!
//! The pattern is stored as a single u8 value (0-242), where each position
//! contributes digit × 3^position to the total.

use super::Word;
use super::word::{WORD_LENGTH, letter_index};
use std::fmt;

/// Feedback for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Letter does not occur among the unmatched target letters
    Absent,
    /// Letter occurs in the target at another position
    Partial,
    /// Letter is in the correct position
    Exact,
}

impl Mark {
    const fn digit(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Partial => 1,
            Self::Exact => 2,
        }
    }

    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Exact,
            1 => Self::Partial,
            _ => Self::Absent,
        }
    }

    /// Row-format symbol: `G`, `Y` or `-`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Partial => 'Y',
            Self::Absent => '-',
        }
    }
}

/// Feedback pattern for a Wordle guess
///
/// Represents the five marks as a single byte value.
/// Value range: 0-242 (3^5 - 1 = 243 possible patterns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(u8);

impl Pattern {
    /// All exact (perfect match)
    pub const PERFECT: Self = Self(242); // 2 + 2×3 + 2×9 + 2×27 + 2×81

    /// Create a new pattern from a raw value
    ///
    /// # Panics
    /// Panics in debug mode if value >= 243
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!(value < 243, "Pattern value must be < 243");
        Self(value)
    }

    /// Build a pattern from per-position marks
    #[must_use]
    pub fn from_marks(marks: [Mark; WORD_LENGTH]) -> Self {
        let mut pattern = 0u8;
        let mut multiplier = 1u8;
        for mark in marks {
            pattern += mark.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Get the raw pattern value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this is a perfect match (all exact)
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == 242
    }

    /// Mark at a position (0-4)
    #[must_use]
    pub fn mark(self, position: usize) -> Mark {
        let divisor = 3u8.pow(position as u32);
        Mark::from_digit((self.0 / divisor) % 3)
    }

    /// All five marks in position order
    #[must_use]
    pub fn marks(self) -> [Mark; WORD_LENGTH] {
        let mut marks = [Mark::Absent; WORD_LENGTH];
        let mut val = self.0;
        for mark in &mut marks {
            *mark = Mark::from_digit(val % 3);
            val /= 3;
        }
        marks
    }

    /// Calculate the pattern when `guess` is played against `target`
    ///
    /// This implements Wordle's exact feedback rules, including proper handling
    /// of duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: Mark all exact matches and remove them from the available pool
    /// 2. Second pass: Mark partials from the letters still available, consuming one each
    /// 3. Encode as base-3 number
    ///
    /// Running the passes in the other order, or not consuming matched letters,
    /// over-reports repeated letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_voi::core::{Word, Pattern};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let target = Word::new("slate").unwrap();
    /// let pattern = Pattern::calculate(&guess, &target);
    ///
    /// // C(absent) R(absent) A(exact) N(absent) E(exact)
    /// assert_eq!(pattern.to_string(), "--G-G");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let mut result = [Mark::Absent; WORD_LENGTH];
        let mut target_available = target.letter_counts();

        // First pass: exact position matches
        for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
            if g == t {
                result[i] = Mark::Exact;
                target_available[letter_index(g)] -= 1;
            }
        }

        // Second pass: partials from the remaining pool
        for (i, &g) in guess.chars().iter().enumerate() {
            if result[i] == Mark::Exact {
                continue;
            }
            let count = &mut target_available[letter_index(g)];
            if *count > 0 {
                result[i] = Mark::Partial;
                *count -= 1;
            }
        }

        Self::from_marks(result)
    }

    /// Count the positions carrying a given mark
    #[must_use]
    pub fn count(self, mark: Mark) -> usize {
        self.marks().iter().filter(|&&m| m == mark).count()
    }

    /// Count the number of exact feedback squares
    #[must_use]
    pub fn count_exact(self) -> usize {
        self.count(Mark::Exact)
    }

    /// Count the number of partial feedback squares
    #[must_use]
    pub fn count_partial(self) -> usize {
        self.count(Mark::Partial)
    }

    /// Parse a pattern from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for exact
    /// - 'Y'/'y'/🟨 for partial
    /// - '-'/'_'/⬜ for absent
    ///
    /// Returns `None` for anything that is not exactly five recognised symbols.
    ///
    /// # Examples
    /// ```
    /// use wordle_voi::core::Pattern;
    ///
    /// let p1 = Pattern::parse("GY-GY").unwrap();
    /// let p2 = Pattern::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// assert!(Pattern::parse("GYG").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();

        if chars.len() != WORD_LENGTH {
            return None;
        }

        let mut marks = [Mark::Absent; WORD_LENGTH];
        for (mark, ch) in marks.iter_mut().zip(chars) {
            *mark = match ch {
                'G' | 'g' | '🟩' => Mark::Exact,
                'Y' | 'y' | '🟨' => Mark::Partial,
                '-' | '_' | '⬜' => Mark::Absent,
                _ => return None,
            };
        }

        Some(Self::from_marks(marks))
    }

    /// Convert pattern to emoji string
    ///
    /// # Examples
    /// ```
    /// use wordle_voi::core::Pattern;
    ///
    /// let p = Pattern::parse("GY-GY").unwrap();
    /// assert_eq!(p.to_emoji(), "🟩🟨⬜🟩🟨");
    /// ```
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.marks()
            .iter()
            .map(|mark| match mark {
                Mark::Exact => '🟩',
                Mark::Partial => '🟨',
                Mark::Absent => '⬜',
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.marks() {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid pattern string: {s}"))
    }
}
