//! Per-trial intersection tally.

use crate::pattern::{Pattern, PATTERN_COUNT};

/// Counts of universe elements per membership pattern for one trial.
///
/// Pure aggregation over the incidence vector; the 16 counts always sum
/// to the universe size. Rebuilt (not merged) every trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    counts: [u64; PATTERN_COUNT],
}

impl Tally {
    /// Tally a filled incidence vector, visiting every element once.
    pub fn from_incidence(incidence: &[u8]) -> Tally {
        let mut counts = [0u64; PATTERN_COUNT];
        for &pattern in incidence {
            counts[pattern as usize] += 1;
        }
        Tally { counts }
    }

    /// Elements whose pattern is exactly `pattern`.
    pub fn count(&self, pattern: Pattern) -> u64 {
        self.counts[pattern.index()]
    }

    /// Sum of all 16 counts; equals the universe size by construction.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
