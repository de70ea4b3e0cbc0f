//! Monte Carlo significance of set overlaps.
//!
//! Given up to four labeled subsets of a finite universe and the observed
//! sizes of their intersections, this crate estimates how often random,
//! independently placed subsets of the same sizes would overlap at least
//! as much. The pipeline is sampler -> tally -> estimator, with a
//! closed-form expected-value calculator alongside for reporting.

pub mod config;
pub mod estimator;
pub mod expected;
pub mod pattern;
pub mod report;
pub mod sampler;
pub mod tally;

pub use config::{ConfigBuilder, ConfigError, SimulationConfig};
pub use estimator::{SignificanceEstimator, SignificanceSummary};
pub use expected::ExpectedOverlaps;
pub use pattern::{Pattern, SetLabel};
pub use report::{ReportRow, SimulationReport};
pub use sampler::IncidenceSampler;
pub use tally::Tally;
