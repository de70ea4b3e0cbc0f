//! Random incidence generation for one trial.

use rand::Rng;

use crate::config::SimulationConfig;
use crate::pattern::SetLabel;

/// Fills a per-trial incidence vector: one membership pattern per universe
/// element, with exactly the configured number of elements carrying each
/// subset's bit.
///
/// Subsets are sampled independently of one another; an element ends up in
/// an intersection only by chance, which is exactly the null model the
/// estimator needs.
#[derive(Debug)]
pub struct IncidenceSampler {
    sizes: [usize; 4],
    incidence: Vec<u8>,
}

impl IncidenceSampler {
    pub fn new(config: &SimulationConfig) -> Self {
        IncidenceSampler {
            sizes: config.sizes,
            incidence: vec![0; config.universe],
        }
    }

    /// Run one trial: reset the vector and place every subset.
    ///
    /// Returns the filled incidence vector, valid until the next trial.
    pub fn sample_trial<R: Rng>(&mut self, rng: &mut R) -> &[u8] {
        self.incidence.fill(0);
        for label in SetLabel::ALL {
            let quota = self.sizes[label.index()];
            if quota > 0 {
                self.place_subset(label.bit(), quota, rng);
            }
        }
        &self.incidence
    }

    /// Rejection-sample `quota` distinct positions for one subset bit.
    ///
    /// Draws uniform positions and skips any that already carry this bit,
    /// giving a uniform without-replacement selection. Only this subset's
    /// own bit is consulted; other subsets' placements are invisible here.
    /// Terminates because config validation guarantees quota <= N.
    fn place_subset<R: Rng>(&mut self, bit: u8, quota: usize, rng: &mut R) {
        let universe = self.incidence.len();
        let mut placed = 0;
        while placed < quota {
            let slot = rng.gen_range(0..universe);
            if self.incidence[slot] & bit == 0 {
                self.incidence[slot] |= bit;
                placed += 1;
            }
        }
    }
}
