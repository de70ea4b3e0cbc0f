// Command handler for: Rscript
//
// Emits an R script that draws the configured sets with the VennDiagram
// library. The 2-, 3-, or 4-set plot is selected by how many subsets
// have a nonzero size.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use miette::IntoDiagnostic;

use soi_prob::{Pattern, SimulationConfig};

use super::helpers::build_config;

pub(crate) fn run_rscript_command(
    specs: Vec<String>,
    universe: Option<usize>,
    out: Option<PathBuf>,
    image: String,
) -> miette::Result<()> {
    let config = build_config(&specs, universe, 1, None, 1)?;
    let script = render_rscript(&config, &image)?;
    match out {
        Some(path) => {
            fs::write(&path, script).into_diagnostic()?;
            println!("R script written to {}", path.display());
        }
        None => print!("{script}"),
    }
    Ok(())
}

/// Render the full VennDiagram script for the configured sets.
pub(crate) fn render_rscript(config: &SimulationConfig, image: &str) -> miette::Result<String> {
    let mut script = String::from("# Generated by soi\nlibrary(VennDiagram)\n\n");
    match config.populated_sets() {
        2 => render_pairwise(&mut script, config),
        3 => render_triple(&mut script, config),
        4 => render_quad(&mut script, config),
        n => {
            return Err(miette::miette!(
                "Venn plots need 2, 3, or 4 non-empty sets, but {} are configured.",
                n
            ));
        }
    }
    let _ = writeln!(script, "# Write image to file");
    let _ = writeln!(script, "png(filename=\"{image}\");");
    let _ = writeln!(script, "grid.draw(venn.plot);");
    let _ = writeln!(script, "dev.off()");
    Ok(script)
}

fn target(config: &SimulationConfig, key: &str) -> u64 {
    config.target(Pattern::from_key(key).expect("static intersection key"))
}

fn render_pairwise(script: &mut String, config: &SimulationConfig) {
    let _ = writeln!(script, "venn.plot <- draw.pairwise.venn(");
    let _ = writeln!(script, "area1 = {},", config.sizes[0]);
    let _ = writeln!(script, "area2 = {},", config.sizes[1]);
    let _ = writeln!(script, "cross.area = {},", target(config, "AB"));
    let _ = writeln!(script, "category = c(\"A\", \"B\"),");
    let _ = writeln!(script, "fill = c(\"orange\", \"blue\"),");
    let _ = writeln!(script, "lty = \"solid\",");
    let _ = writeln!(script, "euler.d = TRUE,");
    let _ = writeln!(script, "scaled = TRUE");
    let _ = writeln!(script, ");\n");
}

fn render_triple(script: &mut String, config: &SimulationConfig) {
    let _ = writeln!(script, "venn.plot <- draw.triple.venn(");
    let _ = writeln!(script, "area1 = {},", config.sizes[0]);
    let _ = writeln!(script, "area2 = {},", config.sizes[1]);
    let _ = writeln!(script, "area3 = {},", config.sizes[2]);
    let _ = writeln!(script, "n12 = {},", target(config, "AB"));
    let _ = writeln!(script, "n13 = {},", target(config, "AC"));
    let _ = writeln!(script, "n23 = {},", target(config, "BC"));
    let _ = writeln!(script, "n123 = {},", target(config, "ABC"));
    let _ = writeln!(script, "category = c(\"A\", \"B\", \"C\"),");
    let _ = writeln!(script, "fill = c(\"orange\", \"red\", \"green\"),");
    let _ = writeln!(script, "lty = \"solid\",");
    let _ = writeln!(script, "cex = 2,");
    let _ = writeln!(script, "cat.cex = 2,");
    let _ = writeln!(script, "cat.col = c(\"orange\", \"red\", \"green\")");
    let _ = writeln!(script, ");\n");
}

fn render_quad(script: &mut String, config: &SimulationConfig) {
    let _ = writeln!(script, "venn.plot <- draw.quad.venn(");
    let _ = writeln!(script, "area1 = {},", config.sizes[0]);
    let _ = writeln!(script, "area2 = {},", config.sizes[1]);
    let _ = writeln!(script, "area3 = {},", config.sizes[2]);
    let _ = writeln!(script, "area4 = {},", config.sizes[3]);
    let _ = writeln!(script, "n12 = {},", target(config, "AB"));
    let _ = writeln!(script, "n13 = {},", target(config, "AC"));
    let _ = writeln!(script, "n14 = {},", target(config, "AD"));
    let _ = writeln!(script, "n23 = {},", target(config, "BC"));
    let _ = writeln!(script, "n24 = {},", target(config, "BD"));
    let _ = writeln!(script, "n34 = {},", target(config, "CD"));
    let _ = writeln!(script, "n123 = {},", target(config, "ABC"));
    let _ = writeln!(script, "n124 = {},", target(config, "ABD"));
    let _ = writeln!(script, "n134 = {},", target(config, "ACD"));
    let _ = writeln!(script, "n234 = {},", target(config, "BCD"));
    let _ = writeln!(script, "n1234 = {},", target(config, "ABCD"));
    let _ = writeln!(script, "category = c(\"A\", \"B\", \"C\", \"D\"),");
    let _ = writeln!(
        script,
        "fill = c(\"orange\", \"red\", \"green\", \"blue\"),"
    );
    let _ = writeln!(script, "lty = \"solid\",");
    let _ = writeln!(script, "cex = 2,");
    let _ = writeln!(script, "cat.cex = 2,");
    let _ = writeln!(
        script,
        "cat.col = c(\"orange\", \"red\", \"green\", \"blue\")"
    );
    let _ = writeln!(script, ");\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(specs: &[&str]) -> SimulationConfig {
        let specs: Vec<String> = specs.iter().map(|s| s.to_string()).collect();
        build_config(&specs, None, 1, None, 1).unwrap()
    }

    #[test]
    fn two_set_script_uses_pairwise_venn() {
        let config = config_for(&["N=1000", "A=100", "B=200", "AB=30"]);
        let script = render_rscript(&config, "venn.png").unwrap();
        assert!(script.contains("library(VennDiagram)"));
        assert!(script.contains("draw.pairwise.venn("));
        assert!(script.contains("area1 = 100,"));
        assert!(script.contains("area2 = 200,"));
        assert!(script.contains("cross.area = 30,"));
        assert!(script.contains("png(filename=\"venn.png\");"));
    }

    #[test]
    fn three_set_script_maps_every_pairwise_and_triple_target() {
        let config = config_for(&[
            "N=1000", "A=100", "B=200", "C=300", "AB=30", "AC=20", "BC=40", "ABC=5",
        ]);
        let script = render_rscript(&config, "out.png").unwrap();
        assert!(script.contains("draw.triple.venn("));
        assert!(script.contains("n12 = 30,"));
        assert!(script.contains("n13 = 20,"));
        assert!(script.contains("n23 = 40,"));
        assert!(script.contains("n123 = 5,"));
    }

    #[test]
    fn four_set_script_maps_the_quadruple_target() {
        let config = config_for(&[
            "N=1000", "A=100", "B=100", "C=100", "D=100", "AB=10", "ABCD=2",
        ]);
        let script = render_rscript(&config, "out.png").unwrap();
        assert!(script.contains("draw.quad.venn("));
        assert!(script.contains("n1234 = 2,"));
        // untested intersections are plotted as zero
        assert!(script.contains("n34 = 0,"));
    }

    #[test]
    fn single_set_has_no_venn_plot() {
        let config = config_for(&["N=1000", "A=100"]);
        assert!(render_rscript(&config, "out.png").is_err());
    }
}
