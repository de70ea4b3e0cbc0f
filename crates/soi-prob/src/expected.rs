//! Analytic expectations under the independence null.

use crate::config::SimulationConfig;
use crate::pattern::{Pattern, PATTERN_COUNT};

/// Expected intersection sizes if the subsets were placed independently.
///
/// For a pattern over subsets X1..Xk the expected fraction of the
/// universe is the product of the subsets' proportions nXi/N, and the
/// expected count is N times that. Closed form, no simulation; used only
/// for side-by-side reporting against the simulated p-values.
#[derive(Debug, Clone)]
pub struct ExpectedOverlaps {
    universe: usize,
    fractions: [f64; PATTERN_COUNT],
}

impl ExpectedOverlaps {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let n = config.universe as f64;
        let mut fractions = [0.0; PATTERN_COUNT];
        for pattern in Pattern::intersections() {
            fractions[pattern.index()] = pattern
                .members()
                .map(|label| config.size_of(label) as f64 / n)
                .product();
        }
        ExpectedOverlaps {
            universe: config.universe,
            fractions,
        }
    }

    /// Expected fraction of the universe for an intersection pattern.
    ///
    /// `None` for the empty and single-subset patterns, which have no
    /// intersection to expect.
    pub fn fraction(&self, pattern: Pattern) -> Option<f64> {
        (pattern.set_count() >= 2).then(|| self.fractions[pattern.index()])
    }

    /// Expected element count, N times the fraction.
    pub fn count(&self, pattern: Pattern) -> Option<f64> {
        self.fraction(pattern).map(|f| self.universe as f64 * f)
    }

    /// Expected count truncated toward zero, the display policy.
    pub fn count_truncated(&self, pattern: Pattern) -> Option<u64> {
        self.count(pattern).map(|c| c as u64)
    }
}
