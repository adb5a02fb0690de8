//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("GPU capacity and usage"),
        "Should show app description"
    );
    assert!(stdout.contains("usage"), "Should show usage command");
    assert!(stdout.contains("workloads"), "Should show workloads command");
    assert!(stdout.contains("nodes"), "Should show nodes command");
    assert!(stdout.contains("report"), "Should show report command");
    assert!(stdout.contains("endpoint"), "Should show endpoint command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("gpuscope"), "Should show binary name");
}

/// Test usage subcommand help
#[test]
fn test_usage_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "usage", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Usage help should succeed");
    assert!(
        stdout.contains("--namespace"),
        "Should show namespace option"
    );
    assert!(
        stdout.contains("--bar-width"),
        "Should show bar-width option"
    );
}

/// Test workloads subcommand help
#[test]
fn test_workloads_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "workloads", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Workloads help should succeed");
    assert!(
        stdout.contains("--namespace"),
        "Should show namespace option"
    );
}

/// Test report subcommand help
#[test]
fn test_report_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "report", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Report help should succeed");
    assert!(stdout.contains("--output"), "Should show output option");
    assert!(
        stdout.contains("--bar-width"),
        "Should show bar-width option"
    );
}

/// Test endpoint check subcommand help
#[test]
fn test_endpoint_check_help() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "gpuscope-cli",
            "--",
            "endpoint",
            "check",
            "--help",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Endpoint check help should succeed");
    assert!(stdout.contains("--url"), "Should show url option");
    assert!(stdout.contains("--model"), "Should show model option");
    assert!(stdout.contains("GPUSCOPE_ENDPOINT"), "Should show env var");
}

/// Test format option
#[test]
fn test_format_option() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test kubeconfig option
#[test]
fn test_kubeconfig_option() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.contains("--kubeconfig"),
        "Should show kubeconfig option"
    );
    assert!(stdout.contains("KUBECONFIG"), "Should show env var");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing subcommand error handling
#[test]
fn test_missing_subcommand() {
    let output = Command::new("cargo")
        .args(["run", "-p", "gpuscope-cli", "--", "endpoint"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Missing subcommand should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing subcommand"
    );
}
