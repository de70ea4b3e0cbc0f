// Command handler for: Run
//
// Builds the validated configuration from the spec surface, drives the
// Monte Carlo trial loop, and renders the per-intersection report.
// Optionally also emits the R plotting script for the configured sets.

use std::fs;
use std::path::PathBuf;

use miette::IntoDiagnostic;
use tracing::info;

use soi_prob::{SignificanceEstimator, SimulationReport};

use super::helpers::{build_config, parse_output_format, OutputFormat};
use super::rscript::render_rscript;

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_run_command(
    specs: Vec<String>,
    universe: Option<usize>,
    iterations: u64,
    seed: Option<u64>,
    threads: usize,
    format: String,
    rscript: Option<PathBuf>,
    image: String,
) -> miette::Result<()> {
    let format = parse_output_format(&format)?;
    let config = build_config(&specs, universe, iterations, seed, threads)?;

    info!(
        universe = config.universe,
        iterations = config.iterations,
        workers = config.workers,
        "starting simulation"
    );
    let summary = SignificanceEstimator::new(&config).run();
    let report = SimulationReport::new(&config, &summary);

    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Tab => print!("{}", report.render_tab()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{json}");
        }
    }

    if let Some(path) = rscript {
        let script = render_rscript(&config, &image)?;
        fs::write(&path, script).into_diagnostic()?;
        info!(path = %path.display(), "R plotting script written");
    }

    Ok(())
}
