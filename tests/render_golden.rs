//! Golden (snapshot) tests for the rendered statistics.
//!
//! These tests use insta to capture the exact bytes each output format
//! produces, so column alignment, CSV quoting and JSON field order stay stable.
//!
//! Run `cargo insta review` to review changes after modifying the code.

use gitfame_core::{render_to_string, AuthorSummary, OutputFormat};

fn summary(name: &str, lines: usize, commits: usize, files: usize) -> AuthorSummary {
    AuthorSummary {
        name: name.to_string(),
        lines,
        commits,
        files,
    }
}

/// Ranked by lines; includes a name needing CSV quoting and a non-ASCII name.
fn ranked() -> Vec<AuthorSummary> {
    vec![
        summary("Alice", 120, 3, 2),
        summary("Bob", 80, 5, 1),
        summary("Doe, Jane", 7, 1, 1),
        summary("Zoë", 0, 1, 1),
    ]
}

#[test]
fn test_tabular_four_authors() {
    let output = render_to_string(OutputFormat::Tabular, &ranked()).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_tabular_empty() {
    let output = render_to_string(OutputFormat::Tabular, &[]).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_csv_four_authors() {
    let output = render_to_string(OutputFormat::Csv, &ranked()).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_json_four_authors() {
    let output = render_to_string(OutputFormat::Json, &ranked()).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_json_empty() {
    let output = render_to_string(OutputFormat::Json, &[]).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_json_lines_four_authors() {
    let output = render_to_string(OutputFormat::JsonLines, &ranked()).unwrap();
    insta::assert_snapshot!(output);
}

#[test]
fn test_json_lines_empty_writes_nothing() {
    let output = render_to_string(OutputFormat::JsonLines, &[]).unwrap();
    assert!(output.is_empty(), "no summaries means no lines");
}
