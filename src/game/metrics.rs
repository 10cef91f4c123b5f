//! Per-attempt guess quality metrics

use crate::core::Word;

/// Bits of information gained by narrowing `before` candidates to `after`
///
/// `log₂(before) − log₂(max(after, 1))`, floored at zero. An empty `before`
/// set gains nothing.
#[must_use]
pub fn information_gain(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    let after = after.max(1);
    ((before as f64).log2() - (after as f64).log2()).max(0.0)
}

/// Share of candidates eliminated, in `[0, 1]` for a shrinking set
#[must_use]
pub fn reduction_rate(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (before as f64 - after as f64) / before as f64
}

/// Positions at which the two words differ
#[must_use]
pub fn hamming_distance(a: &Word, b: &Word) -> usize {
    a.chars()
        .iter()
        .zip(b.chars().iter())
        .filter(|(x, y)| x != y)
        .count()
}

/// Edit distance between the two words (insert, delete, substitute)
#[must_use]
pub fn levenshtein_distance(a: &Word, b: &Word) -> usize {
    let a = a.chars();
    let b = b.chars();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
