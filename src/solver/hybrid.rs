//! Two strategies routed by attempt number
//!
//! Routing is a pure function of the attempt (history length + 1). Both sides
//! see every update so belief-tracking strategies stay in sync through turns
//! they did not play. The surviving candidates are the words both sides keep,
//! so a side that never filters cannot widen the other side's set.

use super::strategy::{RewardConfig, Strategy};
use crate::core::{Observation, Pattern, Word, already_guessed};
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which side plays a given attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// First strategy for attempts 1..=k, second afterwards
    SwitchAfter(usize),
    /// First strategy on odd attempts
    AlternateFirst,
    /// Second strategy on odd attempts
    AlternateSecond,
}

/// One side of a hybrid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl Schedule {
    /// Side that plays `attempt` (1-based)
    #[must_use]
    pub const fn side_for(self, attempt: usize) -> Side {
        let odd = attempt % 2 == 1;
        match self {
            Self::SwitchAfter(k) if attempt <= k => Side::First,
            Self::SwitchAfter(_) => Side::Second,
            Self::AlternateFirst if odd => Side::First,
            Self::AlternateFirst => Side::Second,
            Self::AlternateSecond if odd => Side::Second,
            Self::AlternateSecond => Side::First,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchAfter(k) => write!(f, "switch:{k}"),
            Self::AlternateFirst => f.write_str("alt-a"),
            Self::AlternateSecond => f.write_str("alt-b"),
        }
    }
}

impl FromStr for Schedule {
    type Err = String;

    /// Parse `switch:K`, `alt-a` or `alt-b`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alt-a" | "alternate-a" => Ok(Self::AlternateFirst),
            "alt-b" | "alternate-b" => Ok(Self::AlternateSecond),
            other => other
                .strip_prefix("switch:")
                .and_then(|k| k.parse().ok())
                .map(Self::SwitchAfter)
                .ok_or_else(|| format!("invalid schedule '{s}' (expected switch:K, alt-a or alt-b)")),
        }
    }
}

/// Hybrid of two boxed strategies
pub struct HybridStrategy {
    first: Box<dyn Strategy + Send>,
    second: Box<dyn Strategy + Send>,
    schedule: Schedule,
    name: String,
    last_side: Option<Side>,
}

impl HybridStrategy {
    #[must_use]
    pub fn new(
        first: Box<dyn Strategy + Send>,
        second: Box<dyn Strategy + Send>,
        schedule: Schedule,
    ) -> Self {
        let name = format!("{}+{} ({schedule})", first.name(), second.name());
        Self {
            first,
            second,
            schedule,
            name,
            last_side: None,
        }
    }

    /// Side whose guess was actually played on the last `select_guess`
    #[must_use]
    pub const fn last_side(&self) -> Option<Side> {
        self.last_side
    }

    fn side_mut(&mut self, side: Side) -> &mut (dyn Strategy + Send) {
        match side {
            Side::First => self.first.as_mut(),
            Side::Second => self.second.as_mut(),
        }
    }
}

impl Strategy for HybridStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn update_belief(&mut self, candidates: &[Word], guess: &Word, feedback: Pattern) -> Vec<Word> {
        let first = self.first.update_belief(candidates, guess, feedback);
        let second: FxHashSet<Word> = self
            .second
            .update_belief(candidates, guess, feedback)
            .into_iter()
            .collect();
        first.into_iter().filter(|w| second.contains(w)).collect()
    }

    fn select_guess(&mut self, candidates: &[Word], history: &[Observation]) -> Option<Word> {
        let routed = self.schedule.side_for(history.len() + 1);

        for side in [routed, routed.other()] {
            let strategy = self.side_mut(side);
            match strategy.select_guess(candidates, history) {
                Some(guess) if !already_guessed(history, &guess) => {
                    self.last_side = Some(side);
                    return Some(guess);
                }
                Some(guess) => {
                    warn!(strategy = strategy.name(), guess = %guess, "repeated guess, falling back");
                }
                None => {
                    warn!(strategy = strategy.name(), "no guess produced, falling back");
                }
            }
        }

        self.last_side = None;
        None
    }

    fn set_rewards(&mut self, rewards: RewardConfig) {
        self.first.set_rewards(rewards);
        self.second.set_rewards(rewards);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.last_side = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::strategy::StrategyKind;
    use std::sync::{Arc, Mutex};

    fn word(w: &str) -> Word {
        Word::new(w).unwrap()
    }

    /// Plays a fixed word and records every update it receives
    struct Scripted {
        label: &'static str,
        answer: Option<Word>,
        updates: Arc<Mutex<Vec<Word>>>,
        /// Candidates kept on update; `None` keeps everything
        keep: Option<Vec<Word>>,
    }

    impl Strategy for Scripted {
        fn name(&self) -> &str {
            self.label
        }

        fn update_belief(&mut self, candidates: &[Word], guess: &Word, _feedback: Pattern) -> Vec<Word> {
            self.updates.lock().unwrap().push(guess.clone());
            match &self.keep {
                Some(keep) => candidates.iter().filter(|w| keep.contains(w)).cloned().collect(),
                None => candidates.to_vec(),
            }
        }

        fn select_guess(&mut self, _candidates: &[Word], _history: &[Observation]) -> Option<Word> {
            self.answer.clone()
        }
    }

    type Updates = Arc<Mutex<Vec<Word>>>;

    fn scripted(label: &'static str, answer: Option<&str>) -> (Box<dyn Strategy + Send>, Updates) {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let strategy = Scripted {
            label,
            answer: answer.map(word),
            updates: Arc::clone(&updates),
            keep: None,
        };
        (Box::new(strategy), updates)
    }

    fn keeping(label: &'static str, keep: &[&str]) -> Box<dyn Strategy + Send> {
        Box::new(Scripted {
            label,
            answer: None,
            updates: Arc::new(Mutex::new(Vec::new())),
            keep: Some(keep.iter().map(|w| word(w)).collect()),
        })
    }

    fn history(n: usize) -> Vec<Observation> {
        ["aaaaa", "bbbbb", "ccccc", "ddddd", "eeeee"]
            .iter()
            .take(n)
            .map(|w| Observation::new(word(w), Pattern::new(0)))
            .collect()
    }

    #[test]
    fn schedules_route_by_attempt() {
        let switch = Schedule::SwitchAfter(2);
        let sides: Vec<Side> = (1..=6).map(|a| switch.side_for(a)).collect();
        assert_eq!(
            sides,
            [Side::First, Side::First, Side::Second, Side::Second, Side::Second, Side::Second]
        );

        for attempt in 1..=6 {
            let a = Schedule::AlternateFirst.side_for(attempt);
            let b = Schedule::AlternateSecond.side_for(attempt);
            assert_eq!(a == Side::First, attempt % 2 == 1);
            assert_eq!(b, a.other());
        }
    }

    #[test]
    fn schedule_parsing() {
        assert_eq!("switch:3".parse::<Schedule>(), Ok(Schedule::SwitchAfter(3)));
        assert_eq!("alt-a".parse::<Schedule>(), Ok(Schedule::AlternateFirst));
        assert_eq!("ALT-B".parse::<Schedule>(), Ok(Schedule::AlternateSecond));
        assert!("switch:x".parse::<Schedule>().is_err());
        assert!("sometimes".parse::<Schedule>().is_err());

        for schedule in [Schedule::SwitchAfter(4), Schedule::AlternateFirst, Schedule::AlternateSecond] {
            assert_eq!(schedule.to_string().parse::<Schedule>(), Ok(schedule));
        }
    }

    #[test]
    fn routes_to_scheduled_side() {
        let (a, _) = scripted("a", Some("crane"));
        let (b, _) = scripted("b", Some("slate"));
        let mut hybrid = HybridStrategy::new(a, b, Schedule::AlternateFirst);

        assert_eq!(hybrid.select_guess(&[], &history(0)), Some(word("crane")));
        assert_eq!(hybrid.last_side(), Some(Side::First));
        assert_eq!(hybrid.select_guess(&[], &history(1)), Some(word("slate")));
        assert_eq!(hybrid.last_side(), Some(Side::Second));
    }

    #[test]
    fn both_sides_receive_updates() {
        let (a, a_updates) = scripted("a", Some("crane"));
        let (b, b_updates) = scripted("b", Some("slate"));
        let mut hybrid = HybridStrategy::new(a, b, Schedule::SwitchAfter(1));

        hybrid.update_belief(&[], &word("crane"), Pattern::new(0));
        hybrid.update_belief(&[], &word("slate"), Pattern::new(0));

        assert_eq!(*a_updates.lock().unwrap(), [word("crane"), word("slate")]);
        assert_eq!(*b_updates.lock().unwrap(), [word("crane"), word("slate")]);
    }

    #[test]
    fn update_keeps_words_both_sides_keep() {
        let candidates: Vec<Word> = ["crane", "slate", "trace", "plane"].iter().map(|w| word(w)).collect();
        let first = keeping("a", &["plane", "trace", "crane"]);
        let second = keeping("b", &["crane", "plane", "slate"]);
        let mut hybrid = HybridStrategy::new(first, second, Schedule::SwitchAfter(1));

        let remaining = hybrid.update_belief(&candidates, &word("stare"), Pattern::new(0));
        assert_eq!(remaining, [word("crane"), word("plane")]);
    }

    #[test]
    fn non_filtering_side_does_not_widen_candidates() {
        let candidates: Vec<Word> = ["crane", "slate", "trace"].iter().map(|w| word(w)).collect();
        let (everything, _) = scripted("a", None);
        let filtering = keeping("b", &["trace"]);
        let mut hybrid = HybridStrategy::new(everything, filtering, Schedule::SwitchAfter(1));

        let remaining = hybrid.update_belief(&candidates, &word("stare"), Pattern::new(0));
        assert_eq!(remaining, [word("trace")]);
    }

    #[test]
    fn falls_back_when_routed_side_fails() {
        let (a, _) = scripted("a", None);
        let (b, _) = scripted("b", Some("slate"));
        let mut hybrid = HybridStrategy::new(a, b, Schedule::AlternateFirst);

        assert_eq!(hybrid.select_guess(&[], &history(0)), Some(word("slate")));
        assert_eq!(hybrid.last_side(), Some(Side::Second));
    }

    #[test]
    fn falls_back_on_repeated_guess() {
        let (a, _) = scripted("a", Some("aaaaa"));
        let (b, _) = scripted("b", Some("slate"));
        let mut hybrid = HybridStrategy::new(a, b, Schedule::SwitchAfter(6));

        assert_eq!(hybrid.select_guess(&[], &history(1)), Some(word("slate")));
    }

    #[test]
    fn none_when_both_fail() {
        let (a, _) = scripted("a", None);
        let (b, _) = scripted("b", None);
        let mut hybrid = HybridStrategy::new(a, b, Schedule::AlternateSecond);

        assert!(hybrid.select_guess(&[], &history(0)).is_none());
        assert!(hybrid.last_side().is_none());
    }

    #[test]
    fn name_describes_composition() {
        let css = Box::new(StrategyKind::Css.build(RewardConfig::default(), Some(1)));
        let voi = Box::new(StrategyKind::Voi.build(RewardConfig::default(), Some(2)));
        let hybrid = HybridStrategy::new(css, voi, Schedule::SwitchAfter(2));

        assert_eq!(hybrid.name(), "css+voi (switch:2)");
    }
}
