// Command handler for: Expected
//
// Reports the closed-form independence expectations only, without
// running any trials. Intersections among empty subsets are skipped.

use soi_prob::{ExpectedOverlaps, Pattern};

use super::helpers::build_config;

pub(crate) fn run_expected_command(
    specs: Vec<String>,
    universe: Option<usize>,
) -> miette::Result<()> {
    // Iteration count is irrelevant here; any positive value validates.
    let config = build_config(&specs, universe, 1, None, 1)?;
    let expected = ExpectedOverlaps::from_config(&config);

    println!("# N = {}", config.universe);
    for pattern in Pattern::intersections() {
        if pattern.members().any(|l| config.size_of(l) == 0) {
            continue;
        }
        if let Some(count) = expected.count(pattern) {
            println!("{}: Expected={:.2}", pattern, count);
        }
    }
    Ok(())
}
