//! Monte Carlo significance estimation.
//!
//! Drives K independent trials of the null model (independent random
//! subset placement), compares each trial's tally against the observed
//! targets, and turns accumulated success counts into Laplace-smoothed
//! empirical p-values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::pattern::{Pattern, PATTERN_COUNT};
use crate::sampler::IncidenceSampler;
use crate::tally::Tally;

/// Spreads worker indices across the seed space. Each worker derives an
/// independent RNG stream from the base seed so parallel trials are not
/// correlated.
const WORKER_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Runs the trial loop for one configuration.
pub struct SignificanceEstimator<'a> {
    config: &'a SimulationConfig,
}

impl<'a> SignificanceEstimator<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        SignificanceEstimator { config }
    }

    /// Run all K trials and return the accumulated summary.
    ///
    /// With `workers == 1` the loop is strictly sequential and, given a
    /// fixed seed, bit-reproducible. With more workers the trials are
    /// partitioned across a rayon pool; each worker owns a private
    /// incidence buffer and RNG stream, and the per-pattern success
    /// counters are merged by addition afterwards (order-independent).
    pub fn run(&self) -> SignificanceSummary {
        let base_seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let workers = self.config.workers.min(self.config.iterations as usize).max(1);

        let successes = if workers == 1 {
            run_partition(self.config, self.config.iterations, base_seed)
        } else {
            let per_worker = self.config.iterations / workers as u64;
            let remainder = self.config.iterations % workers as u64;
            (0..workers as u64)
                .into_par_iter()
                .map(|worker| {
                    let trials = per_worker + u64::from(worker < remainder);
                    let seed = base_seed.wrapping_add(worker.wrapping_mul(WORKER_SEED_STRIDE));
                    run_partition(self.config, trials, seed)
                })
                .reduce(
                    || [0u64; PATTERN_COUNT],
                    |mut acc, part| {
                        for (a, p) in acc.iter_mut().zip(part) {
                            *a += p;
                        }
                        acc
                    },
                )
        };

        debug!(
            iterations = self.config.iterations,
            workers,
            seed = base_seed,
            "trial loop finished"
        );

        SignificanceSummary {
            trials: self.config.iterations,
            targets: self.config.targets,
            successes,
        }
    }
}

/// Run `trials` trials with one sampler, tallying successes per pattern.
///
/// A trial succeeds for a pattern when its tally meets or exceeds the
/// target (>=, so exactly reproducing the observation counts — the
/// estimator never claims more significance than the observation
/// supports). Patterns with a zero target are never counted.
fn run_partition(config: &SimulationConfig, trials: u64, seed: u64) -> [u64; PATTERN_COUNT] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sampler = IncidenceSampler::new(config);
    let mut successes = [0u64; PATTERN_COUNT];

    for _ in 0..trials {
        let tally = Tally::from_incidence(sampler.sample_trial(&mut rng));
        for pattern in Pattern::all() {
            let target = config.targets[pattern.index()];
            if target > 0 && tally.count(pattern) >= target {
                successes[pattern.index()] += 1;
            }
        }
    }
    successes
}

/// Accumulated outcome of a completed run.
#[derive(Debug, Clone)]
pub struct SignificanceSummary {
    trials: u64,
    targets: [u64; PATTERN_COUNT],
    successes: [u64; PATTERN_COUNT],
}

impl SignificanceSummary {
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Trials whose tally met or exceeded the pattern's target.
    pub fn successes(&self, pattern: Pattern) -> u64 {
        self.successes[pattern.index()]
    }

    /// Laplace-smoothed empirical p-value for an intersection pattern.
    ///
    /// ```text
    /// p = (1 + successes) / (1 + trials)
    /// ```
    ///
    /// Strictly in (0, 1]: never exactly zero even when no trial met the
    /// target, so finite sampling cannot overstate significance. Returns
    /// `None` for untested patterns (zero target) and for patterns of
    /// fewer than two subsets, which are not meaningful significance
    /// targets.
    pub fn p_value(&self, pattern: Pattern) -> Option<f64> {
        if pattern.set_count() < 2 || self.targets[pattern.index()] == 0 {
            return None;
        }
        Some((1 + self.successes[pattern.index()]) as f64 / (1 + self.trials) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets_for(entries: &[(&str, u64)]) -> [u64; PATTERN_COUNT] {
        let mut targets = [0u64; PATTERN_COUNT];
        for (key, count) in entries {
            targets[Pattern::from_key(key).unwrap().index()] = *count;
        }
        targets
    }

    #[test]
    fn single_trial_p_value_is_half_or_one() {
        // N=100, nA=nB=50, target(AB)=25, K=1: successes is 0 or 1, so
        // p is exactly 1/(1+1) or 2/(1+1).
        let config = SimulationConfig::new(
            100,
            [50, 50, 0, 0],
            targets_for(&[("AB", 25)]),
            1,
        )
        .unwrap()
        .with_seed(42);
        let summary = SignificanceEstimator::new(&config).run();
        let p = summary.p_value(Pattern::from_key("AB").unwrap()).unwrap();
        assert!(p == 0.5 || p == 1.0, "p was {p}");
    }

    #[test]
    fn successes_never_exceed_trials() {
        let config = SimulationConfig::new(
            50,
            [40, 40, 0, 0],
            targets_for(&[("AB", 1)]),
            200,
        )
        .unwrap()
        .with_seed(5);
        let summary = SignificanceEstimator::new(&config).run();
        assert!(summary.successes(Pattern::from_key("AB").unwrap()) <= 200);
    }

    #[test]
    fn p_value_stays_in_unit_interval() {
        // An impossible target (larger than either subset) still yields
        // the Laplace floor, never zero.
        let config = SimulationConfig::new(
            100,
            [10, 10, 0, 0],
            targets_for(&[("AB", 100)]),
            99,
        )
        .unwrap()
        .with_seed(1);
        let summary = SignificanceEstimator::new(&config).run();
        let p = summary.p_value(Pattern::from_key("AB").unwrap()).unwrap();
        assert_eq!(p, 1.0 / 100.0);
    }

    #[test]
    fn certain_target_always_succeeds() {
        // target(AB)=1 with nA=nB=N: every element is in AB every trial.
        let config = SimulationConfig::new(
            20,
            [20, 20, 0, 0],
            targets_for(&[("AB", 1)]),
            50,
        )
        .unwrap()
        .with_seed(9);
        let summary = SignificanceEstimator::new(&config).run();
        assert_eq!(summary.successes(Pattern::from_key("AB").unwrap()), 50);
        assert_eq!(
            summary.p_value(Pattern::from_key("AB").unwrap()),
            Some(1.0)
        );
    }

    #[test]
    fn zero_targets_are_excluded() {
        let config = SimulationConfig::new(
            100,
            [50, 50, 50, 0],
            targets_for(&[("AB", 10)]),
            10,
        )
        .unwrap()
        .with_seed(3);
        let summary = SignificanceEstimator::new(&config).run();
        assert_eq!(summary.p_value(Pattern::from_key("AC").unwrap()), None);
        assert_eq!(summary.successes(Pattern::from_key("AC").unwrap()), 0);
    }

    #[test]
    fn single_subset_patterns_are_never_reported() {
        let mut targets = [0u64; PATTERN_COUNT];
        targets[Pattern::from_key("A").unwrap().index()] = 5;
        let config = SimulationConfig::new(100, [50, 0, 0, 0], targets, 10)
            .unwrap()
            .with_seed(3);
        let summary = SignificanceEstimator::new(&config).run();
        assert_eq!(summary.p_value(Pattern::from_key("A").unwrap()), None);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let config = SimulationConfig::new(
            200,
            [80, 90, 30, 0],
            targets_for(&[("AB", 30), ("AC", 10), ("ABC", 3)]),
            500,
        )
        .unwrap()
        .with_seed(777);
        let first = SignificanceEstimator::new(&config).run();
        let second = SignificanceEstimator::new(&config).run();
        for pattern in Pattern::intersections() {
            assert_eq!(first.p_value(pattern), second.p_value(pattern));
            assert_eq!(first.successes(pattern), second.successes(pattern));
        }
    }

    #[test]
    fn seeded_parallel_run_is_reproducible() {
        let config = SimulationConfig::new(
            100,
            [50, 50, 0, 0],
            targets_for(&[("AB", 20)]),
            400,
        )
        .unwrap()
        .with_seed(123)
        .with_workers(4);
        let first = SignificanceEstimator::new(&config).run();
        let second = SignificanceEstimator::new(&config).run();
        assert_eq!(
            first.p_value(Pattern::from_key("AB").unwrap()),
            second.p_value(Pattern::from_key("AB").unwrap())
        );
    }

    #[test]
    fn unreachable_pattern_trends_to_laplace_floor() {
        // ABCD requested with nC = nD = 0: tally(ABCD) is always zero,
        // so p is exactly 1/(1+K).
        let config = SimulationConfig::new(
            100,
            [50, 50, 0, 0],
            targets_for(&[("ABCD", 5)]),
            250,
        )
        .unwrap()
        .with_seed(17);
        let summary = SignificanceEstimator::new(&config).run();
        assert_eq!(
            summary.p_value(Pattern::from_key("ABCD").unwrap()),
            Some(1.0 / 251.0)
        );
    }
}
