//! Shared argument-to-config plumbing for the command handlers.

use soi_prob::{ConfigBuilder, SimulationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Tab,
    Json,
}

pub(crate) fn parse_output_format(format: &str) -> miette::Result<OutputFormat> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "tab" => Ok(OutputFormat::Tab),
        "json" => Ok(OutputFormat::Json),
        other => Err(miette::miette!(
            "Unknown output format '{}'. Use text | tab | json.",
            other
        )),
    }
}

/// Fold CLI flags and `KEY=COUNT` spec pairs into a validated config.
///
/// The `-n` flag is applied first, so an explicit `N=` spec wins, matching
/// the positional spec surface's precedence.
pub(crate) fn build_config(
    specs: &[String],
    universe: Option<usize>,
    iterations: u64,
    seed: Option<u64>,
    threads: usize,
) -> miette::Result<SimulationConfig> {
    let mut builder = ConfigBuilder::new()
        .iterations(iterations)
        .seed(seed)
        .workers(threads);
    if let Some(n) = universe {
        builder = builder.universe(n);
    }
    for spec in specs {
        builder = builder
            .apply_spec(spec)
            .map_err(|e| miette::miette!("Invalid spec: {e}"))?;
    }
    builder
        .build()
        .map_err(|e| miette::miette!("Invalid configuration: {e}"))
}
