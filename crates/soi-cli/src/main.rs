mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            specs,
            universe,
            iterations,
            seed,
            threads,
            format,
            rscript,
            image,
        } => {
            commands::run::run_run_command(
                specs, universe, iterations, seed, threads, format, rscript, image,
            )?;
        }
        Commands::Expected { specs, universe } => {
            commands::expected::run_expected_command(specs, universe)?;
        }
        Commands::Rscript {
            specs,
            universe,
            out,
            image,
        } => {
            commands::rscript::run_rscript_command(specs, universe, out, image)?;
        }
    }

    Ok(())
}
