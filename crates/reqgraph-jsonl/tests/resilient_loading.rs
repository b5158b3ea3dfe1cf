//! Integration tests for resilient JSONL loading from files.

use reqgraph_jsonl::{read_jsonl_resilient, Error, Warning};
use rstest::rstest;
use serde::Deserialize;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    #[serde(default)]
    area: Option<String>,
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}

#[tokio::test]
async fn loads_every_valid_line_in_order() {
    let file = write_temp(
        "{\"id\":\"RM-001\",\"area\":\"Ingesta\"}\n{\"id\":\"RM-002\"}\n{\"id\":\"RM-003\"}\n",
    );

    let (rows, warnings) = read_jsonl_resilient::<Row, _>(file.path()).await.unwrap();

    assert!(warnings.is_empty());
    let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["RM-001", "RM-002", "RM-003"]);
    assert_eq!(rows[0].area.as_deref(), Some("Ingesta"));
    assert_eq!(rows[1].area, None);
}

#[rstest]
#[case::truncated_object("{\"id\":\"RM-001\"", "malformed_json")]
#[case::garbage("id,area", "malformed_json")]
#[case::missing_id("{\"area\":\"Ingesta\"}", "skipped_line")]
#[case::wrong_type("{\"id\":42}", "skipped_line")]
#[case::array_line("[1,2,3]", "skipped_line")]
#[tokio::test]
async fn bad_line_is_skipped_with_warning(#[case] bad_line: &str, #[case] expected_kind: &str) {
    let file = write_temp(&format!(
        "{{\"id\":\"RM-001\"}}\n{bad_line}\n{{\"id\":\"RM-002\"}}\n"
    ));

    let (rows, warnings) = read_jsonl_resilient::<Row, _>(file.path()).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind(), expected_kind);
    assert_eq!(warnings[0].line_number(), 2);
}

#[tokio::test]
async fn blank_lines_are_ignored_without_warnings() {
    let file = write_temp("\n{\"id\":\"RM-001\"}\n   \n\n{\"id\":\"RM-002\"}\n\n");

    let (rows, warnings) = read_jsonl_resilient::<Row, _>(file.path()).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn warning_line_numbers_count_blank_lines() {
    let file = write_temp("\n\n{oops}\n");

    let (rows, warnings) = read_jsonl_resilient::<Row, _>(file.path()).await.unwrap();

    assert!(rows.is_empty());
    assert!(matches!(
        warnings.as_slice(),
        [Warning::MalformedJson { line_number: 3, .. }]
    ));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.jsonl");

    let err = read_jsonl_resilient::<Row, _>(&missing).await.unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}
