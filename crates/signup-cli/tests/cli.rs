use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn run_json(args: &[&str]) -> (Option<i32>, Value) {
    let output = cargo_bin_cmd!("signup")
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    let value = serde_json::from_slice(&output.stdout).expect("parse json");
    (output.status.code(), value)
}

#[test]
fn validate_normalizes_name_and_email() {
    let (code, value) = run_json(&[
        "validate",
        "--name",
        "ada lovelace",
        "--email",
        "ADA@X.COM",
        "--password",
        "secret1",
        "--order",
        "Book:50",
    ]);
    assert_eq!(code, Some(0));
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@x.com",
            "password": "secret1",
            "orders": [{"title": "Book", "total": 50}]
        })
    );
}

#[test]
fn validate_reports_every_violation_and_exits_invalid_input() {
    let (code, value) = run_json(&[
        "validate",
        "--email",
        "not-an-email",
        "--password",
        "12345",
        "--order",
        "Book:0",
        "--order",
        ":101",
    ]);
    assert_eq!(code, Some(3));
    let paths: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|error| error["path"].as_str().expect("path"))
        .collect();
    assert_eq!(
        paths,
        vec![
            "name",
            "email",
            "password",
            "orders.0.total",
            "orders.1.title",
            "orders.1.total"
        ]
    );
    assert_eq!(value[1]["kind"], "format");
    assert_eq!(value[2]["kind"], "length");
    assert_eq!(value[3]["kind"], "range");
}

#[test]
fn validate_without_orders_is_min_count() {
    let (code, value) = run_json(&[
        "validate",
        "--name",
        "ada",
        "--email",
        "ada@x.com",
        "--password",
        "secret1",
    ]);
    assert_eq!(code, Some(3));
    assert_eq!(value[0]["path"], "orders");
    assert_eq!(value[0]["kind"], "min_count");
    assert_eq!(value[0]["message"], "Add at least one order");
}

#[test]
fn validate_reads_draft_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("draft.json");
    fs::write(
        &path,
        r#"{"name":"grace hopper","email":"Grace@Navy.MIL","password":"cobol!!","orders":[{"title":"Compiler","total":"100"}]}"#,
    )
    .expect("write draft");

    let (code, value) = run_json(&["validate", "--input", path.to_str().expect("path")]);
    assert_eq!(code, Some(0));
    assert_eq!(value["name"], "Grace Hopper");
    assert_eq!(value["email"], "grace@navy.mil");
    assert_eq!(value["orders"][0]["total"], 100);
}

#[test]
fn validate_reads_draft_from_stdin() {
    let output = cargo_bin_cmd!("signup")
        .args(["validate", "--input", "-"])
        .write_stdin(r#"{"name":"ada","email":"ada@x.com","password":"secret1","orders":[{"title":"Book","total":1}]}"#)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("name: Ada"));
    assert!(stdout.contains("password: *******"));
    assert!(stdout.contains("1. Book (1)"));
}

#[test]
fn human_output_lists_path_and_message() {
    let output = cargo_bin_cmd!("signup")
        .args(["validate", "--name", "ada", "--email", "ada@x.com", "--password", "x"])
        .args(["--order", "Book:abc"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("password: Password should have at least 6 characters"));
    assert!(stdout.contains("orders.0.total: Expected number, received nan"));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("error: 2 field(s) failed validation"));
}

#[test]
fn blank_total_and_hostless_email_are_rejected() {
    let (code, value) = run_json(&[
        "validate",
        "--name",
        "ada",
        "--email",
        "ada@localhost",
        "--password",
        "secret1",
        "--order",
        "Book:",
    ]);
    assert_eq!(code, Some(3));
    assert_eq!(value[0]["path"], "email");
    assert_eq!(value[0]["kind"], "format");
    assert_eq!(value[1]["path"], "orders.0.total");
    assert_eq!(value[1]["kind"], "type");
    assert_eq!(value[1]["message"], "Expected number, received nan");
}

#[test]
fn malformed_order_flag_is_invalid_input() {
    let output = cargo_bin_cmd!("signup")
        .args(["validate", "--order", "Book"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("expected TITLE:TOTAL"));
}

#[test]
fn malformed_draft_json_is_invalid_input() {
    let output = cargo_bin_cmd!("signup")
        .args(["validate", "--input", "-"])
        .write_stdin("{not json")
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn tui_rejects_missing_explicit_config() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.toml");
    let output = cargo_bin_cmd!("signup")
        .args(["--config", missing.to_str().expect("path"), "tui"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load config"));
}

#[test]
fn completions_emit_script() {
    let output = cargo_bin_cmd!("signup")
        .args(["completions", "bash"])
        .output()
        .expect("run command");
    assert!(output.status.success());
    let script = String::from_utf8(output.stdout).expect("utf8");
    assert!(script.contains("validate"));
}
