//! End-to-end tests for the `lark` binary.

use std::process::{Command, Output};

use serde_json::Value;

/// Helper to run the binary and return its output
fn lark(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lark"))
        .args(args)
        .output()
        .expect("failed to run lark")
}

/// Helper to run the binary and return its stdout lines, asserting success
fn lark_lines(args: &[&str]) -> Vec<String> {
    let output = lark(args);
    assert!(
        output.status.success(),
        "lark {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Number of lines printed after the parse error header
fn error_lines(lines: &[String]) -> usize {
    lines
        .iter()
        .position(|line| line.contains("=== Parse Errors ==="))
        .map_or(0, |header| lines.len() - header - 1)
}

// ========== token stream ==========

#[test]
fn test_tokens_start_in_data_without_fragment() {
    let lines = lark_lines(&["--html", "a<b>c", "--tokens"]);
    assert_eq!(lines, ["\"a\"", "<b>", "\"c\"", "EOF"]);
}

#[test]
fn test_tokens_follow_fragment_context() {
    let lines = lark_lines(&["--html", "a<b>c", "--tokens", "--fragment", "textarea"]);
    assert_eq!(lines, ["\"a<b>c\"", "EOF"]);
}

#[test]
fn test_tokens_honor_max_errors() {
    let quiet = lark_lines(&["--html", "&#0;&#0;&#0;", "--tokens"]);
    assert_eq!(error_lines(&quiet), 0);

    let capped = lark_lines(&["--html", "&#0;&#0;&#0;", "--tokens", "--max-errors", "2"]);
    assert_eq!(error_lines(&capped), 2);
}

#[test]
fn test_tokens_reject_invalid_context() {
    let output = lark(&["--html", "x", "--tokens", "--fragment", "1td"]);
    assert!(!output.status.success());
}

// ========== tree output ==========

#[test]
fn test_outline_of_document() {
    let lines = lark_lines(&["--html", "<p>Hi"]);
    assert!(lines.iter().any(|line| line == "      <p>"));
    assert!(lines.iter().any(|line| line == "        \"Hi\""));
}

#[test]
fn test_json_fragment_nodes() {
    let output = lark(&["--html", "<td>a<td>b", "--fragment", "tr", "--json"]);
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["tagName"], "td");
    assert_eq!(json["errors"], Value::Array(Vec::new()));
}

#[test]
fn test_json_reports_errors_when_requested() {
    let output = lark(&["--html", "<p></b>", "--json", "--max-errors", "5"]);
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(!json["errors"].as_array().expect("errors array").is_empty());
}

#[test]
fn test_missing_input_fails() {
    let output = lark(&[]);
    assert!(!output.status.success());
}
