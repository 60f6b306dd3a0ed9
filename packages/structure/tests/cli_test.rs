//! Tests of the `regelrecht-structure` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn structure() -> Command {
    Command::cargo_bin("regelrecht-structure").expect("binary is built")
}

#[test]
fn test_extract_json_to_stdout() {
    structure()
        .arg("extract")
        .arg(fixture("rules.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"node_id\": \"0\""))
        .stdout(predicate::str::contains("Правила внутреннего распорядка"));
}

#[test]
fn test_extract_yaml_to_file() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("tree.yaml");

    structure()
        .args(["extract", "--kind", "tz", "--format", "yaml", "--output"])
        .arg(&output)
        .arg(fixture("tz.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to:"));

    let written = std::fs::read_to_string(&output).expect("output written");
    assert!(written.contains("node_id: '0'"));
    assert!(written.contains("line_type: part"));
}

#[test]
fn test_extract_reports_law_type_warning() {
    structure()
        .args(["extract", "--kind", "auto-law"])
        .arg(fixture("order.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Use foiv classifier"));
}

#[test]
fn test_levels_lists_line_types() {
    structure()
        .args(["levels", "--kind", "diploma"])
        .arg(fixture("diploma.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("toc_item"))
        .stdout(predicate::str::contains("named_item"));
}

#[test]
fn test_levels_with_patterns() {
    structure()
        .arg("levels")
        .arg("--patterns")
        .arg(fixture("patterns.yaml"))
        .arg(fixture("rules.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("point"));
}

#[test]
fn test_features_lists_prefixes() {
    structure()
        .args(["features", "--window", "3"])
        .arg(fixture("rules.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("same_indent_3"))
        .stdout(predicate::str::contains("dotted"));
}

#[test]
fn test_unknown_kind_fails() {
    structure()
        .args(["extract", "--kind", "novel"])
        .arg(fixture("rules.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unknown document kind: 'novel'"));
}

#[test]
fn test_invalid_patterns_fail() {
    let dir = TempDir::new().expect("temp dir");
    let patterns = dir.path().join("patterns.json");
    std::fs::write(&patterns, r#"[{"name": "regexp", "line_type": "x", "level_1": 1}]"#).expect("write patterns");

    structure()
        .arg("extract")
        .arg("--patterns")
        .arg(&patterns)
        .arg(fixture("rules.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required key 'regexp'"));
}

#[test]
fn test_missing_file_fails() {
    structure()
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}
