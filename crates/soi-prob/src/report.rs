//! Run report: observed targets next to analytic expectations and
//! simulated p-values.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::estimator::SignificanceSummary;
use crate::expected::ExpectedOverlaps;
use crate::pattern::Pattern;

/// One reported intersection.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Intersection key ("AB", "ABC", ...).
    pub pattern: Pattern,
    /// Expected count under independence, truncated toward zero.
    pub expected: u64,
    /// Externally observed count (the target).
    pub observed: u64,
    /// Laplace-smoothed empirical p-value, in (0, 1].
    pub p_value: f64,
}

/// Full result of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub universe: usize,
    pub sizes: SubsetSizes,
    pub iterations: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Rows for every intersection with a nonzero target, in pattern
    /// index order.
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubsetSizes {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
}

impl SimulationReport {
    pub fn new(config: &SimulationConfig, summary: &SignificanceSummary) -> Self {
        let expected = ExpectedOverlaps::from_config(config);
        let rows = Pattern::intersections()
            .filter_map(|pattern| {
                let p_value = summary.p_value(pattern)?;
                Some(ReportRow {
                    pattern,
                    expected: expected.count_truncated(pattern).unwrap_or(0),
                    observed: config.target(pattern),
                    p_value,
                })
            })
            .collect();
        SimulationReport {
            universe: config.universe,
            sizes: SubsetSizes {
                a: config.sizes[0],
                b: config.sizes[1],
                c: config.sizes[2],
                d: config.sizes[3],
            },
            iterations: config.iterations,
            seed: config.seed,
            rows,
        }
    }

    /// Human-readable rendering, one line per tested intersection.
    pub fn render_text(&self) -> String {
        let mut out = format!("# N = {}\n", self.universe);
        for row in &self.rows {
            out.push_str(&format!(
                "{}: Expected={}, Observed={}, P={:.6}\n",
                row.pattern, row.expected, row.observed, row.p_value
            ));
        }
        out
    }

    /// Tab-delimited rendering for downstream tooling.
    pub fn render_tab(&self) -> String {
        let mut out = format!("# N = {}\n", self.universe);
        for row in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t{}\t{:.6}\n",
                row.pattern, row.expected, row.observed, row.p_value
            ));
        }
        out
    }
}
