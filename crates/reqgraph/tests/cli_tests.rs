//! Integration tests for the reqgraph CLI.
//!
//! These tests run the built binary against a small requirement list.

use std::fs;

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{SAMPLE, json_output, run_reqgraph_in_dir, workspace_with};

#[fixture]
fn sample_dir() -> TempDir {
    workspace_with(SAMPLE)
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();

    let output = run_reqgraph_in_dir(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["stats", "ancestors", "descendants", "neighbors", "filter", "cycles", "export"] {
        assert!(text.contains(command), "help should mention {command}");
    }
}

// ============================================================================
// Queries
// ============================================================================

#[rstest]
fn stats_as_json(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["--json", "stats"]);

    let json = json_output(&output);
    assert_eq!(json["node_count"], 6);
    assert_eq!(json["edge_count"], 6);
    assert_eq!(json["max_level"], 2);
    assert_eq!(json["acyclic"], false);
    assert_eq!(json["cycle_node_count"], 2);
    assert_eq!(json["warning_count"], 1);
}

#[rstest]
#[case::ancestors("ancestors", "RM-004", &["RM-001", "RM-002", "RM-003", "RM-004"])]
#[case::descendants("descendants", "RM-002", &["RM-002", "RM-004"])]
#[case::neighbors("neighbors", "RM-001", &["RM-001", "RM-002", "RM-003"])]
#[case::lowercase_id("ancestors", "rm-002", &["RM-001", "RM-002"])]
fn relation_queries(
    sample_dir: TempDir,
    #[case] command: &str,
    #[case] id: &str,
    #[case] expected: &[&str],
) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["--json", command, id]);

    let json = json_output(&output);
    assert_eq!(json["nodes"], serde_json::json!(expected));
}

#[rstest]
fn query_intersects_with_filter(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(
        sample_dir.path(),
        &["--json", "ancestors", "RM-004", "--area", "Seguridad"],
    );

    let json = json_output(&output);
    assert_eq!(json["nodes"], serde_json::json!(["RM-001", "RM-002"]));
    assert_eq!(json["edges"], 1);
}

#[rstest]
fn filter_by_area(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["--json", "filter", "--area", "Reportes"]);

    let json = json_output(&output);
    assert_eq!(json["nodes"], serde_json::json!(["RM-003", "RM-004"]));
    assert_eq!(json["edges"], 1);
    assert_eq!(json["options"]["areas"], serde_json::json!(["Core", "Reportes", "Seguridad"]));
}

#[rstest]
fn show_text_output(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["show", "RM-005"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("RM-005"));
    assert!(text.contains("Core"));
    assert!(text.contains("circular dependency"));
}

#[rstest]
fn show_lists_direct_neighbours(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["show", "RM-002"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Direct dependencies: RM-001"));
    assert!(text.contains("Direct dependents: RM-004"));

    let json = json_output(&run_reqgraph_in_dir(sample_dir.path(), &["--json", "show", "RM-004"]));
    assert_eq!(json["direct_dependencies"], serde_json::json!(["RM-002", "RM-003"]));
    assert_eq!(json["direct_dependents"], serde_json::json!([]));
}

#[rstest]
fn unknown_id_fails(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["descendants", "RM-999"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown requirement: RM-999"));
}

#[rstest]
fn cycles_text_output(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["cycles"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("RM-005 → RM-006 → RM-005"));
}

// ============================================================================
// Diagnostics and export
// ============================================================================

#[rstest]
fn check_reports_load_and_build_warnings(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["--json", "check"]);

    let json = json_output(&output);
    assert_eq!(json["load"].as_array().unwrap().len(), 1);
    assert_eq!(json["build"][0]["kind"], "unknown_reference");
    assert_eq!(json["build"][0]["reference"], "RM-099");
}

#[rstest]
fn check_strict_fails_on_warnings(sample_dir: TempDir) {
    let output = run_reqgraph_in_dir(sample_dir.path(), &["check", "--strict"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("strict mode"));
}

#[test]
fn check_strict_passes_clean_input() {
    let dir = workspace_with("{\"id\": \"RM-001\"}\n{\"id\": \"RM-002\", \"dependencies\": \"RM-001\"}\n");

    let output = run_reqgraph_in_dir(dir.path(), &["check", "--strict"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No problems found"));
}

#[rstest]
fn export_writes_file(sample_dir: TempDir) {
    let target = sample_dir.path().join("graph.json");

    let output = run_reqgraph_in_dir(sample_dir.path(), &["export", "-o", "graph.json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(target).unwrap()).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(json["ancestry"]["RM-004"]["ancestors"], serde_json::json!(["RM-001", "RM-002", "RM-003"]));
    assert_eq!(json["cycles"]["cycles"], serde_json::json!([["RM-005", "RM-006"]]));
}

// ============================================================================
// Configuration
// ============================================================================

#[rstest]
fn disabled_feature_is_a_config_error(sample_dir: TempDir) {
    fs::write(
        sample_dir.path().join("reqgraph.yaml"),
        "features:\n  cycle-diagnostics: false\n",
    )
    .unwrap();

    let output = run_reqgraph_in_dir(sample_dir.path(), &["cycles"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("cycle-diagnostics feature is disabled"));
}

#[rstest]
fn explicit_config_path(sample_dir: TempDir) {
    fs::write(sample_dir.path().join("custom.yaml"), "max-cycles: 0\n").unwrap();

    let output = run_reqgraph_in_dir(sample_dir.path(), &["--json", "-c", "custom.yaml", "cycles"]);

    let json = json_output(&output);
    assert_eq!(json["cycles"], serde_json::json!([]));
    assert_eq!(json["truncated"], true);
    assert_eq!(json["nodes"], serde_json::json!(["RM-005", "RM-006"]));
}

#[test]
fn missing_input_fails_with_context() {
    let dir = TempDir::new().unwrap();

    let output = run_reqgraph_in_dir(dir.path(), &["stats"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read requirements.jsonl"));
}
