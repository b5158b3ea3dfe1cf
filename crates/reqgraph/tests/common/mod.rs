//! Common test utilities shared across integration tests.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Requirement list used by the CLI tests.
///
/// `RM-001 -> RM-002 -> RM-004`, `RM-001 -> RM-003 -> RM-004`, a cycle
/// between `RM-005` and `RM-006`, one dangling reference and one bad line.
pub const SAMPLE: &str = r#"{"ID": "RM-001", "Área": "Seguridad", "Funcionalidad": "Login", "Prioridad": "Alta (P0)", "Dependencias": "—"}
{"ID": "RM-002", "Área": "Seguridad", "Funcionalidad": "Roles", "Dependencias": "RM-001"}
{"ID": "RM-003", "Área": "Reportes", "Funcionalidad": "Export", "Versión_objetivo": "v2", "Dependencias": "RM-001"}
{"ID": "RM-004", "Área": "Reportes", "Funcionalidad": "Audit", "Dependencias": "RM-002, RM-003, RM-099"}
{"ID": "RM-005", "Área": "Core", "Dependencias": "RM-006"}
{"ID": "RM-006", "Área": "Core", "Dependencias": "RM-005"}
this line is not json
"#;

/// A temporary directory holding `requirements.jsonl` with `content`.
pub fn workspace_with(content: &str) -> TempDir {
    let dir = TempDir::new().expect("should create temp dir");
    fs::write(dir.path().join("requirements.jsonl"), content).expect("should write input");
    dir
}

/// Run the reqgraph binary in `dir` without colours.
pub fn run_reqgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reqgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("should execute reqgraph binary")
}

/// Stdout of a successful run, as JSON.
pub fn json_output(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}
