//! End-to-end contract tests for the `soi` binary.

use std::process::Command;

fn soi(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_soi"))
        .args(args)
        .output()
        .expect("failed to execute soi")
}

#[test]
fn help_documents_the_spec_surface() {
    let output = soi(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("KEY=COUNT"));
    assert!(stdout.contains("soi run N=1000 A=100 B=200 AB=30"));
}

#[test]
fn run_reports_the_tested_intersection() {
    let output = soi(&[
        "run", "N=1000", "A=100", "B=200", "AB=30", "-i", "200", "--seed", "7",
    ]);
    assert!(output.status.success(), "run should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# N = 1000"));
    // Expected(AB) = 1000 * 0.1 * 0.2 = 20
    assert!(stdout.contains("AB: Expected=20, Observed=30, P=0."));
}

#[test]
fn seeded_runs_print_identical_reports() {
    let args = [
        "run", "N=500", "A=50", "B=80", "C=40", "AB=12", "ABC=3", "-i", "300", "--seed", "42",
    ];
    let first = soi(&args);
    let second = soi(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn tab_format_emits_tab_separated_rows() {
    let output = soi(&[
        "run", "N=1000", "A=100", "B=200", "AB=30", "-i", "50", "--seed", "1", "--format", "tab",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let row = stdout
        .lines()
        .find(|l| l.starts_with("AB\t"))
        .expect("tab row for AB");
    assert_eq!(row.split('\t').count(), 4);
}

#[test]
fn json_format_is_machine_readable() {
    let output = soi(&[
        "run", "N=1000", "A=100", "B=200", "AB=30", "-i", "50", "--seed", "1", "--format", "json",
    ]);
    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(report["universe"], 1000);
    assert_eq!(report["iterations"], 50);
    assert_eq!(report["rows"][0]["pattern"], "AB");
    assert_eq!(report["rows"][0]["observed"], 30);
    let p = report["rows"][0]["p_value"].as_f64().unwrap();
    assert!(p > 0.0 && p <= 1.0);
}

#[test]
fn unknown_spec_key_is_rejected() {
    let output = soi(&["run", "N=100", "XY=5"]);
    assert!(!output.status.success(), "unknown key must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("XY"));
}

#[test]
fn oversized_subset_is_rejected_before_simulation() {
    let output = soi(&["run", "N=10", "A=11", "B=5", "AB=1"]);
    assert!(!output.status.success(), "oversized subset must fail");
}

#[test]
fn unknown_format_is_rejected() {
    let output = soi(&["run", "N=100", "A=10", "B=10", "AB=1", "--format", "csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("csv"));
}

#[test]
fn expected_subcommand_skips_simulation_output() {
    let output = soi(&["expected", "N=100", "A=50", "B=50"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AB: Expected=25.00"));
    assert!(!stdout.contains("P="));
}

#[test]
fn rscript_subcommand_writes_a_venn_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plot.R");
    let output = soi(&[
        "rscript",
        "N=1000",
        "A=100",
        "B=200",
        "AB=30",
        "--out",
        path.to_str().unwrap(),
        "--image",
        "overlap.png",
    ]);
    assert!(output.status.success(), "rscript should succeed");
    let script = std::fs::read_to_string(&path).expect("script file");
    assert!(script.contains("draw.pairwise.venn("));
    assert!(script.contains("png(filename=\"overlap.png\");"));
}

#[test]
fn rscript_needs_at_least_two_sets() {
    let output = soi(&["rscript", "N=1000", "A=100"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2, 3, or 4"));
}
