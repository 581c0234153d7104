//! CLI Smoke Test
//!
//! Runs the compiled binary against a seeded snapshot database and checks
//! that the report and test-source commands succeed.

use crate::common::{sample_analysis, seed_snapshot};
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_connecta-stats"));
    command.env_remove("CONNECTA_SNAPSHOT_PATH");
    command
}

fn seeded_snapshot(dir: &TempDir) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.path().join("snapshot.db");
    seed_snapshot(
        &path,
        &[
            sample_analysis("k1", "instagram", 12_000, 7.5),
            sample_analysis("k2", "youtube", 8_000, 6.0),
            sample_analysis("k3", "instagram", 20_000, 8.0),
        ],
    )?;
    Ok(path)
}

#[test]
fn test_report_json_to_stdout() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let snapshot = seeded_snapshot(&dir)?;

    let output = binary()
        .args(["report", "--format", "json", "--dimension", "overview"])
        .args(["--dimension", "commerce", "--page-size", "2", "--snapshot"])
        .arg(&snapshot)
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let parsed: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["overview"]["total_analyses"], 3);
    assert_eq!(parsed["commerce_orientation"]["status"], "available");
    Ok(())
}

#[test]
fn test_report_console_to_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let snapshot = seeded_snapshot(&dir)?;
    let out_path = dir.path().join("reports").join("report.txt");

    let status = binary()
        .args(["report", "--platform", "instagram", "--snapshot"])
        .arg(&snapshot)
        .arg("--output")
        .arg(&out_path)
        .status()?;
    assert!(status.success());

    let written = std::fs::read_to_string(&out_path)?;
    assert!(written.contains("=== Overview ==="));
    assert!(written.contains("Total analyses: 2"));
    assert!(written.contains("=== Evaluation Scores ==="));
    Ok(())
}

#[test]
fn test_unknown_dimension_rejected() -> anyhow::Result<()> {
    let output = binary()
        .args(["report", "--dimension", "sentiment"])
        .output()?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_source_counts_snapshot_rows() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let snapshot = seeded_snapshot(&dir)?;

    let output = binary()
        .args(["test-source", "--snapshot"])
        .arg(&snapshot)
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PASSED"));
    assert!(stdout.contains("holds 3 analyses"));
    Ok(())
}
