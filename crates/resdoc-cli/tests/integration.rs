//! Integration tests for CLI commands.

use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "types": [
        { "name": "article", "fields": [
            { "kind": "field", "name": "title" },
            { "kind": "belongsTo", "name": "author", "targetType": "user" }
        ] },
        { "name": "user", "fields": [ { "kind": "field", "name": "username" } ] },
        { "name": "tag", "fields": [ { "kind": "field", "name": "name" } ] }
    ]
}"#;

struct Fixture {
    _dir: TempDir,
    schema: String,
    article: String,
    tags: String,
}

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "schema.json", SCHEMA);
    let article = write(
        &dir,
        "article.json",
        r#"{ "article": { "id": 1, "title": "X", "author": { "username": "jd" } } }"#,
    );
    let tags = write(&dir, "tags.json", r#"{ "tags": ["ember", "rust"] }"#);
    Fixture {
        _dir: dir,
        schema,
        article,
        tags,
    }
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_resdoc"))
        .args(args)
        .output()
        .expect("failed to run resdoc");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_normalize_command() {
    let f = fixture();
    let (success, stdout, _) = run_cli(&[
        "normalize",
        &f.article,
        "--schema",
        &f.schema,
        "--url",
        "/api/articles",
        "--type-map",
        "author=user",
    ]);
    assert!(success);

    let document: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(document["data"]["relationships"]["author"]["data"], json!({ "type": "user", "id": "jd" }));
    assert_eq!(
        document["data"]["relationships"]["author"]["links"]["self"],
        "/api/articles/1/relationships/author"
    );
    assert_eq!(document["included"][0]["type"], "user");
}

#[test]
fn test_normalize_with_report_and_config() {
    let f = fixture();
    let config = write(&f._dir, "config.json", r#"{ "primitive_property_preference": ["label"] }"#);
    let (success, stdout, _) = run_cli(&[
        "normalize",
        &f.tags,
        "--schema",
        &f.schema,
        "--config",
        &config,
        "--report",
        "--compact",
    ]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1);

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        output["document"]["data"][0],
        json!({ "type": "tag", "id": "ember", "attributes": { "value": "ember" } })
    );
    assert_eq!(output["report"]["status"], "Clean");
    assert_eq!(output["report"]["metrics"]["coerced_primitives"], 2);
}

#[test]
fn test_normalize_reads_stdin() {
    let f = fixture();
    let mut child = Command::new(env!("CARGO_BIN_EXE_resdoc"))
        .args(["normalize", "--schema", f.schema.as_str(), "--compact"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{ "tag": "rust" }"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"data":{"type":"tag","id":"rust","attributes":{}}}"#
    );
}

#[test]
fn test_normalize_missing_identifier_degrades() {
    let f = fixture();
    let payload = write(
        &f._dir,
        "anonymous.json",
        r#"{ "article": { "title": "X", "author": { "username": "jd" } } }"#,
    );
    let (success, stdout, _) = run_cli(&[
        "normalize",
        &payload,
        "--schema",
        &f.schema,
        "--type-map",
        "author=user",
        "--report",
    ]);
    assert!(success);

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["document"]["data"]["id"], "undefined");
    assert_eq!(output["document"]["included"][0]["id"], "jd");
    assert_eq!(output["report"]["status"], "Degraded");
    assert_eq!(output["report"]["warnings"], json!(["MissingIdentifier"]));
}

#[test]
fn test_normalize_unidentified_related_object_fails() {
    let f = fixture();
    let payload = write(
        &f._dir,
        "anonymous-author.json",
        r#"{ "article": { "id": 1, "author": { "email": "jd@example.com" } } }"#,
    );
    let (success, _, stderr) = run_cli(&["normalize", &payload, "--schema", &f.schema]);
    assert!(!success);
    assert!(stderr.contains("author resource has none of id, slug, username, name"));
}

#[test]
fn test_normalize_rejects_bad_type_map() {
    let f = fixture();
    let (success, _, stderr) = run_cli(&[
        "normalize",
        &f.article,
        "--schema",
        &f.schema,
        "--type-map",
        "author",
    ]);
    assert!(!success);
    assert!(stderr.contains("expected NAME=TYPE"));
}

#[test]
fn test_detect_command() {
    let f = fixture();
    let (success, stdout, _) = run_cli(&["detect", &f.tags, "--schema", &f.schema, "--json"]);
    assert!(success);
    let detection: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(detection, json!({ "type": "tag", "shape": "collection", "items": 2 }));

    let (success, stdout, _) = run_cli(&["detect", &f.article, "--schema", &f.schema]);
    assert!(success);
    assert!(stdout.contains("TYPE"));
    assert!(stdout.contains("article"));
    assert!(stdout.contains("single"));
}

#[test]
fn test_canonicalize_command() {
    let f = fixture();
    let input = write(&f._dir, "input.json", r#"{ "b": 1, "a": { "nested": 2 } }"#);
    let (success, stdout, _) = run_cli(&["canonicalize", &input]);
    assert!(success);
    assert_eq!(stdout.trim(), r#"{"a":{"nested":2},"b":1}"#);
}

#[test]
fn test_fingerprint_command_is_stable() {
    let f = fixture();
    let (success, first, _) = run_cli(&["fingerprint", &f.tags, "--schema", &f.schema]);
    assert!(success);
    let (_, second, _) = run_cli(&["fingerprint", &f.tags, "--schema", &f.schema]);
    assert_eq!(first, second);
    assert_eq!(first.trim().len(), 43);

    let (_, other, _) = run_cli(&["fingerprint", &f.article, "--schema", &f.schema]);
    assert_ne!(first, other);
}

#[test]
fn test_missing_schema_file_fails() {
    let f = fixture();
    let (success, _, stderr) = run_cli(&["normalize", &f.tags, "--schema", "/nonexistent/schema.json"]);
    assert!(!success);
    assert!(stderr.starts_with("Error:"));
}
