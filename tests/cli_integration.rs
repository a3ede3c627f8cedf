//! CLI integration tests
//!
//! These tests verify the command-line interface behavior, including:
//! - Command parsing and validation
//! - Output formatting
//! - Error handling
//! - Exit codes

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the winback binary
fn winback_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/winback
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("winback")
}

/// Helper to create a customer export fixture
fn create_customer_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("customers.csv");
    fs::write(
        &path,
        "Email,MRR,Feedback,Churned\n\
         alice@example.com,120,too expensive for our team,no\n\
         bob@example.com,80,app keeps crashing on login,yes\n\
         carol@example.com,200,,no\n",
    )
    .expect("Failed to write fixture");
    path
}

#[test]
fn test_cli_help() {
    let output = Command::new(winback_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("winback"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("schema"));
    assert!(stdout.contains("plays"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(winback_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("winback"));
}

#[test]
fn test_analyze_help() {
    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg("--help")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--engine"));
    assert!(stdout.contains("--out-dir"));
    assert!(stdout.contains("--success-rate"));
}

#[test]
fn test_plays_command() {
    let output = Command::new(winback_bin())
        .arg("plays")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BILLING_COMPLAINT"));
    assert!(stdout.contains("WINBACK_20PCT_OFFER"));
    assert!(stdout.contains("UNKNOWN"));
}

#[test]
fn test_plays_json_format() {
    let output = Command::new(winback_bin())
        .arg("plays")
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("plays --format json must emit valid JSON");
    assert!(parsed.as_array().is_some());
}

#[test]
fn test_schema_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv = create_customer_csv(&temp_dir);

    let output = Command::new(winback_bin())
        .arg("schema")
        .arg(&csv)
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("email"));
    assert!(stdout.contains("Email"));
    assert!(stdout.contains("revenue"));
}

#[test]
fn test_analyze_human_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv = create_customer_csv(&temp_dir);

    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg(&csv)
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Churn Recovery Analysis"));
    assert!(stdout.contains("Universe:"));
    assert!(stdout.contains("Category Breakdown:"));
    // The deterministic engine runs by default
    assert!(stdout.contains("Insights (Deterministic Template):"));
}

#[test]
fn test_analyze_json_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv = create_customer_csv(&temp_dir);

    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg(&csv)
        .arg("--format")
        .arg("json")
        .arg("--no-insights")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("analyze --format json must emit valid JSON");
    assert!(parsed.get("report").is_some());

    // Raw identities never reach the summary payload
    assert!(!stdout.contains("alice@example.com"));
}

#[test]
fn test_analyze_writes_artifacts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv = create_customer_csv(&temp_dir);
    let out_dir = temp_dir.path().join("deliverables");

    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg(&csv)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--no-insights")
        .output()
        .expect("Failed to execute winback");

    assert!(output.status.success());
    assert!(out_dir.join("pii-safe-recovery-export.csv").exists());
    assert!(out_dir.join("deployment-strategy.txt").exists());
    assert!(out_dir.join("audit-receipt.txt").exists());

    let export = fs::read_to_string(out_dir.join("pii-safe-recovery-export.csv"))
        .expect("Failed to read export");
    assert!(export.starts_with("hashed_email,"));
    assert!(!export.contains("alice@example.com"));
}

#[test]
fn test_analyze_nonexistent_file() {
    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg("/nonexistent/path/customers.csv")
        .output()
        .expect("Failed to execute winback");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read input file"));
}

#[test]
fn test_analyze_missing_identity_column() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("no-email.csv");
    fs::write(&path, "Name,MRR\nAlice,100\n").expect("Failed to write fixture");

    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg(&path)
        .output()
        .expect("Failed to execute winback");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No identity column detected"));
}

#[test]
fn test_analyze_rejects_out_of_range_assumptions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv = create_customer_csv(&temp_dir);

    let output = Command::new(winback_bin())
        .arg("analyze")
        .arg(&csv)
        .arg("--success-rate")
        .arg("90")
        .output()
        .expect("Failed to execute winback");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
