use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_source(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn text_report_lists_hints_and_globals() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "sample.py", "import os\n\nclass A:\n    def f(self):\n        return os.sep\n");

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file);
    cmd.assert().success().stdout(
        predicate::str::contains("== diagnostics (0) ==")
            .and(predicate::str::contains("4: def f"))
            .and(predicate::str::contains("modules: os"))
            .and(predicate::str::contains("classes: A")),
    );
}

#[test]
fn json_report_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "f.py", "def f():\n    return True\n");

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file).arg("--json");
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["diagnostics"], serde_json::json!([]));
    assert_eq!(report["hints"][0]["name"], "f");
    assert_eq!(report["hints"][0]["line"], 0);
    assert_eq!(report["hints"][0]["kind"], 2);
    assert_eq!(report["globals"]["functions"], serde_json::json!(["f"]));
    assert_eq!(report["ranks"][1], serde_json::json!({ "enter": 1, "leave": 0 }));
    assert!(report.get("lines").is_none());
}

#[test]
fn style_check_flag_enables_pep8() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "ws.py", "x = 1 \n");

    let mut plain = cargo_bin_cmd!("analyzer");
    plain.arg(&file);
    plain
        .assert()
        .success()
        .stdout(predicate::str::contains("== diagnostics (0) =="));

    let mut styled = cargo_bin_cmd!("analyzer");
    styled.arg(&file).arg("--style-check");
    styled.assert().success().stdout(predicate::str::contains(
        "ws.py:1:6: [pep8] PEP-8: W291 trailing whitespace",
    ));
}

#[test]
fn config_file_sets_line_length() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "long.py", "value = 12345\n");
    let config = write_source(
        &dir,
        "analyzer.json",
        r#"{ "style_check": true, "max_line_length": 10 }"#,
    );

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file).arg("--config").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("E501 line too long (13 > 10 characters)"));

    let mut overridden = cargo_bin_cmd!("analyzer");
    overridden
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .arg("--max-line-length")
        .arg("20");
    overridden
        .assert()
        .success()
        .stdout(predicate::str::contains("E501").not());
}

#[test]
fn replace_updates_categories_only() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "edit.py", "def f():\n    pass\n");

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file).arg("--replace").arg("1=class f:");
    cmd.assert().success().stdout(
        predicate::str::contains("class f:").and(predicate::str::contains("1: def f")),
    );
}

#[test]
fn tokenizer_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "bad.py", "s = 'abc\n");

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file);
    cmd.assert().success().stdout(predicate::str::contains(
        "bad.py:1:5: [tokenizer] unterminated string literal",
    ));
}

#[test]
fn unused_imports_are_reported() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "imports.py", "import os\nimport sys\nprint(sys.argv)\n");

    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file);
    cmd.assert().success().stdout(
        predicate::str::contains("== diagnostics (1) ==")
            .and(predicate::str::contains("imports.py:1:8: [pyflakes] 'os' imported but unused")),
    );
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(dir.path().join("nope.py"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn zero_line_number_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "z.py", "x = 1\n");
    let mut cmd = cargo_bin_cmd!("analyzer");
    cmd.arg(&file).arg("--replace").arg("0=y = 2");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line numbers start at 1"));
}
