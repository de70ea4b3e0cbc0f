//! Validated simulation configuration.
//!
//! The run configuration is an explicit immutable value handed to the
//! engine. Every fatal condition (empty universe, oversized subset or
//! target, zero iterations, unknown spec key) is rejected here, before
//! the first trial; the sampler relies on `size <= N` holding for every
//! subset, otherwise its rejection loop could never terminate.

use thiserror::Error;
use tracing::warn;

use crate::pattern::{Pattern, SetLabel, PATTERN_COUNT};

/// Default universe size when no `N=` spec or `-n` flag is given.
pub const DEFAULT_UNIVERSE: usize = 1000;
/// Default Monte Carlo iteration count.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("universe size must be positive")]
    EmptyUniverse,
    #[error("iteration count must be positive")]
    ZeroIterations,
    #[error("subset {label} has {size} elements but the universe only has {universe}")]
    SubsetTooLarge {
        label: SetLabel,
        size: usize,
        universe: usize,
    },
    #[error("target {pattern}={target} exceeds the universe size {universe}")]
    TargetTooLarge {
        pattern: Pattern,
        target: u64,
        universe: usize,
    },
    #[error("unknown set or intersection key '{0}' (expected one of N, A..D, AB..ABCD)")]
    UnknownKey(String),
    #[error("spec '{0}' is malformed, expected KEY=COUNT")]
    MalformedSpec(String),
}

/// Immutable configuration for one simulation run.
///
/// Constructed through [`ConfigBuilder`] (which understands the
/// `KEY=COUNT` spec surface) or directly through [`SimulationConfig::new`].
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Universe size N.
    pub universe: usize,
    /// Subset sizes, indexed by [`SetLabel::index`].
    pub sizes: [usize; 4],
    /// Observed intersection counts, indexed by pattern. Zero means
    /// "not tested".
    pub targets: [u64; PATTERN_COUNT],
    /// Number of Monte Carlo trials K.
    pub iterations: u64,
    /// Fixed RNG seed, for reproducible runs.
    pub seed: Option<u64>,
    /// Worker count for the trial loop; 1 runs sequentially.
    pub workers: usize,
}

impl SimulationConfig {
    /// Construct a validated configuration.
    ///
    /// Nonzero targets whose pattern includes an empty subset are
    /// impossible to reach in simulation; they are deliberately not
    /// rejected (the estimator reports the Laplace floor for them) but
    /// a warning is logged naming the empty subsets.
    pub fn new(
        universe: usize,
        sizes: [usize; 4],
        targets: [u64; PATTERN_COUNT],
        iterations: u64,
    ) -> Result<Self, ConfigError> {
        if universe == 0 {
            return Err(ConfigError::EmptyUniverse);
        }
        if iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        for label in SetLabel::ALL {
            let size = sizes[label.index()];
            if size > universe {
                return Err(ConfigError::SubsetTooLarge {
                    label,
                    size,
                    universe,
                });
            }
        }
        for pattern in Pattern::all() {
            let target = targets[pattern.index()];
            if target > universe as u64 {
                return Err(ConfigError::TargetTooLarge {
                    pattern,
                    target,
                    universe,
                });
            }
        }

        let config = SimulationConfig {
            universe,
            sizes,
            targets,
            iterations,
            seed: None,
            workers: 1,
        };
        config.warn_on_unreachable_targets();
        Ok(config)
    }

    /// Pin the RNG seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Partition the trial loop across `workers` parallel workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Size of the named subset.
    pub fn size_of(&self, label: SetLabel) -> usize {
        self.sizes[label.index()]
    }

    /// Observed target for the pattern (0 = not tested).
    pub fn target(&self, pattern: Pattern) -> u64 {
        self.targets[pattern.index()]
    }

    /// Number of subsets with nonzero size. Drives 2/3/4-set plot selection.
    pub fn populated_sets(&self) -> usize {
        self.sizes.iter().filter(|s| **s > 0).count()
    }

    fn warn_on_unreachable_targets(&self) {
        for pattern in Pattern::intersections() {
            if self.target(pattern) == 0 {
                continue;
            }
            let empty: Vec<&str> = pattern
                .members()
                .filter(|l| self.size_of(*l) == 0)
                .map(|l| l.name())
                .collect();
            if !empty.is_empty() {
                warn!(
                    target = %pattern,
                    empty_sets = empty.join(","),
                    "target can never be reached: pattern includes empty subsets; \
                     its p-value will sit at the Laplace floor"
                );
            }
        }
    }
}

/// Incremental builder fed from the CLI spec surface (`N=1000 A=100 AB=30`).
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    universe: usize,
    sizes: [usize; 4],
    targets: [u64; PATTERN_COUNT],
    iterations: u64,
    seed: Option<u64>,
    workers: usize,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            universe: DEFAULT_UNIVERSE,
            sizes: [0; 4],
            targets: [0; PATTERN_COUNT],
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            workers: 1,
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn universe(mut self, n: usize) -> Self {
        self.universe = n;
        self
    }

    pub fn iterations(mut self, k: u64) -> Self {
        self.iterations = k;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Apply one `KEY=COUNT` spec pair.
    ///
    /// `N` sets the universe size, a single-letter key sets that subset's
    /// size, and a multi-letter key sets an intersection target.
    pub fn apply_spec(mut self, spec: &str) -> Result<Self, ConfigError> {
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedSpec(spec.to_string()))?;
        let count: u64 = value
            .parse()
            .map_err(|_| ConfigError::MalformedSpec(spec.to_string()))?;
        let pattern =
            Pattern::from_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        match pattern.set_count() {
            0 => self.universe = count as usize,
            1 => {
                let label = pattern.members().next().unwrap();
                self.sizes[label.index()] = count as usize;
            }
            _ => self.targets[pattern.index()] = count,
        }
        Ok(self)
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig::new(self.universe, self.sizes, self.targets, self.iterations)?;
        Ok(SimulationConfig {
            seed: self.seed,
            workers: self.workers,
            ..config
        })
    }
}
