//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const CLI_LONG_ABOUT: &str =
    "Evaluates whether the observed intersections between labeled sets are \
    statistically significant.\n\n\
    Sets and intersections are given as SPEC pairs of the form KEY=COUNT, \
    where KEY is one of: N, A, B, C, D, AB, AC, AD, BC, BD, CD, ABC, ABD, \
    ACD, BCD, ABCD. N is the total number of items in the domain; single \
    letters set subset sizes; longer keys set observed intersection counts.\n\n\
    Example:\n  soi run N=1000 A=100 B=200 AB=30";

#[derive(Parser)]
#[command(name = "soi")]
#[command(about = "Significance of set overlaps by Monte Carlo simulation")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the simulation and report a p-value per tested intersection
    #[command(display_order = 10)]
    Run {
        /// KEY=COUNT pairs describing set sizes and observed intersections
        #[arg(required = true)]
        specs: Vec<String>,

        /// Total number of items in the domain (overridden by an N= spec)
        #[arg(short = 'n', long)]
        universe: Option<usize>,

        /// Number of Monte Carlo iterations
        #[arg(short = 'i', long, default_value_t = soi_prob::config::DEFAULT_ITERATIONS)]
        iterations: u64,

        /// Fix the RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads for the trial loop (1 = sequential)
        #[arg(long, default_value_t = 1)]
        threads: usize,

        /// Output format: text | tab | json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write an R plotting script for the specified sets
        #[arg(long)]
        rscript: Option<PathBuf>,

        /// PNG file the R script will render to
        #[arg(long, default_value = "venn.png")]
        image: String,
    },

    /// Report analytic expected intersection sizes only, no simulation
    #[command(display_order = 11)]
    Expected {
        /// KEY=COUNT pairs describing set sizes
        #[arg(required = true)]
        specs: Vec<String>,

        /// Total number of items in the domain (overridden by an N= spec)
        #[arg(short = 'n', long)]
        universe: Option<usize>,
    },

    /// Emit an R script that plots the specified sets with VennDiagram
    #[command(display_order = 12)]
    Rscript {
        /// KEY=COUNT pairs describing set sizes and observed intersections
        #[arg(required = true)]
        specs: Vec<String>,

        /// Total number of items in the domain (overridden by an N= spec)
        #[arg(short = 'n', long)]
        universe: Option<usize>,

        /// Path to write the R script to (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// PNG file the R script will render to
        #[arg(long, default_value = "venn.png")]
        image: String,
    },
}
