mod common;

use common::{mockspec_cmd, PETSTORE_YAML};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_spec(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_prints_summary() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);

    mockspec_cmd(dir.path())
        .arg("check")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 endpoint(s)"))
        .stdout(predicate::str::contains("GET /pets\n"))
        .stdout(predicate::str::contains("GET /pets/{petId}"))
        .stdout(predicate::str::contains("  default Unexpected error"))
        .stdout(predicate::str::contains("  404 Not found"));
}

#[test]
fn test_check_reports_pointer_on_failure() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "broken.yaml",
        "paths:\n  /pets:\n    get:\n      responses:\n        2xx:\n          description: range\n",
    );

    mockspec_cmd(dir.path())
        .arg("check")
        .arg(&spec)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Invalid status code. Must be integer or \"default\". at #/paths/~1pets/get/responses/2xx",
        ));
}

#[test]
fn test_check_json_errors() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "cycle.json",
        r##"{"paths": {"/pets": {"get": {"responses": {"200": {"$ref": "#/components/responses/A"}}}}},
            "components": {"responses": {"A": {"$ref": "#/components/responses/A"}}}}"##,
    );

    let output = mockspec_cmd(dir.path())
        .arg("--json-errors")
        .arg("check")
        .arg(&spec)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error_type"], "Parsing");
    assert_eq!(error["pointer"], "#/paths/~1pets/get/responses/200");
}

#[test]
fn test_check_missing_file() {
    let dir = TempDir::new().unwrap();

    mockspec_cmd(dir.path())
        .arg("check")
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_dump_outputs_json() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);

    let output = mockspec_cmd(dir.path())
        .arg("dump")
        .arg(&spec)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["useExamples"], "no");
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 64);

    let endpoints = report["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0]["httpMethod"], "GET");
    assert_eq!(endpoints[0]["path"], "/pets");
    assert_eq!(endpoints[0]["parameters"]["responses"]["200"]["statusCode"], 200);
    assert_eq!(endpoints[0]["parameters"]["responses"]["-1"]["statusCode"], -1);
}

#[test]
fn test_file_falls_back_to_configured_specification() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);
    fs::write(
        dir.path().join("config.toml"),
        format!(
            "specification_url = {}\nuse_examples = \"if_present\"\n",
            toml_string(&spec.display().to_string())
        ),
    )
    .unwrap();

    mockspec_cmd(dir.path())
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"useExamples\": \"if_present\""));
}

#[test]
fn test_explicit_config_flag() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);
    let config = dir.path().join("other.toml");
    fs::write(
        &config,
        format!("specification_url = {}\n", toml_string(&spec.display().to_string())),
    )
    .unwrap();

    mockspec_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 endpoint(s)"));
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);

    mockspec_cmd(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("check")
        .arg(&spec)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration Error"))
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_recursive_schema_dump() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "tree.json",
        r##"{"paths": {"/nodes": {"get": {"responses": {"200": {"description": "tree",
              "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Node"}}}}}}}},
            "components": {"schemas": {"Node": {"type": "object",
              "properties": {"next": {"$ref": "#/components/schemas/Node"}}}}}}"##,
    );

    let output = mockspec_cmd(dir.path())
        .arg("dump")
        .arg(&spec)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let schema = &report["endpoints"][0]["parameters"]["responses"]["200"]["content"]
        ["application/json"]["schema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["next"]["type"], "reference");
    assert_eq!(schema["properties"]["next"]["$ref"], "#/components/schemas/Node");
    assert_eq!(
        report["schemas"]["#/components/schemas/Node"]["type"],
        "object"
    );
}

#[test]
fn test_specification_url_from_environment() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);

    mockspec_cmd(dir.path())
        .env("MOCKSPEC_SPECIFICATION_URL", &spec)
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_no_specification_anywhere() {
    let dir = TempDir::new().unwrap();

    mockspec_cmd(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No specification file given"));
}

#[test]
fn test_invalid_settings_file() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "petstore.yaml", PETSTORE_YAML);
    fs::write(dir.path().join("config.toml"), "use_examples = \"always\"\n").unwrap();

    mockspec_cmd(dir.path())
        .arg("--json-errors")
        .arg("check")
        .arg(&spec)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOMLParsing"));
}

/// Quotes a path as a TOML literal string.
fn toml_string(value: &str) -> String {
    format!("'{value}'")
}
