use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn outline_cmd() -> Command {
    let mut cmd = Command::cargo_bin("go-outline").expect("binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_go(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Overlay archive wire format: path, decimal length, then exactly that many
/// content bytes, repeated
fn archive_for(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(path, content)| format!("{path}\n{}\n{content}", content.len()))
        .collect()
}

fn stdout_json(path: &Path, extra_args: &[&str]) -> Value {
    let output = outline_cmd()
        .arg("-f")
        .arg(path)
        .args(extra_args)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn outlines_a_file_on_disk() {
    let temp = tempdir().unwrap();
    let src = r#"package main

import (
	"fmt"
	"strings"
)

const greeting = "hello"

var count, total int

type server struct{}

func (s *server) start() {}

func main() {
	fmt.Println(strings.ToUpper(greeting))
}
"#;
    let path = write_go(temp.path(), "main.go", src);

    let body = stdout_json(&path, &[]);
    let roots = body.as_array().expect("array of one package");
    assert_eq!(roots.len(), 1);

    let root = &roots[0];
    assert_eq!(root["type"], "package");
    assert_eq!(root["label"], "main");
    assert_eq!(root["start"], 1);
    assert_eq!(root["end"], src.len() + 1);
    assert!(root.get("receiverType").is_none());

    let children = root["children"].as_array().expect("children array");
    let summary: Vec<(String, String)> = children
        .iter()
        .map(|c| {
            (
                c["label"].as_str().unwrap().to_string(),
                c["type"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("\"fmt\"".to_string(), "import".to_string()),
            ("\"strings\"".to_string(), "import".to_string()),
            ("greeting".to_string(), "constant".to_string()),
            ("count".to_string(), "variable".to_string()),
            ("total".to_string(), "variable".to_string()),
            ("server".to_string(), "type".to_string()),
            ("start".to_string(), "function".to_string()),
            ("main".to_string(), "function".to_string()),
        ]
    );

    // the method carries its receiver, the plain function does not
    assert_eq!(children[6]["receiverType"], "*server");
    assert!(children[7].get("receiverType").is_none());
    // leaves omit the children key entirely
    assert!(children[7].get("children").is_none());
}

#[test]
fn output_is_one_json_line() {
    let temp = tempdir().unwrap();
    let path = write_go(temp.path(), "demo.go", "package demo\n\nfunc f() {}\n");

    let output = outline_cmd().arg("-f").arg(&path).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with('\n'));
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("[{"));
}

#[test]
fn missing_file_reports_error_and_no_output() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("absent.go");

    outline_cmd()
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: "))
        .stderr(predicate::str::contains("absent.go"));
}

#[test]
fn syntax_error_reports_error_and_no_output() {
    let temp = tempdir().unwrap();
    let path = write_go(
        temp.path(),
        "broken.go",
        "package demo\n\nfunc main() {\n\t@@@\n}\n",
    );

    outline_cmd()
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: could not outline"))
        .stderr(predicate::str::contains("could not parse file"));
}

#[test]
fn top_level_statement_reports_unknown_declaration() {
    let temp = tempdir().unwrap();
    let path = write_go(temp.path(), "stmt.go", "package demo\n\nx := 1\n");

    outline_cmd()
        .arg("-f")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown declaration"));
}

#[test]
fn imports_only_limits_the_outline() {
    let temp = tempdir().unwrap();
    let src = "package demo\n\nimport (\n\t\"fmt\"\n\t\"strings\"\n)\n\nvar x = 1\n\nfunc main() {}\n";
    let path = write_go(temp.path(), "demo.go", src);

    let body = stdout_json(&path, &["--imports-only"]);
    let children = body[0]["children"].as_array().expect("children array");
    assert_eq!(children.len(), 2);
    for child in children {
        assert_eq!(child["type"], "import");
    }
}

#[test]
fn imports_only_tolerates_broken_bodies() {
    let temp = tempdir().unwrap();
    let src = "package demo\n\nimport \"fmt\"\n\nfunc main() {\n\t@@@\n}\n";
    let path = write_go(temp.path(), "broken.go", src);

    // the same file fails a full outline
    outline_cmd().arg("-f").arg(&path).assert().failure();

    let body = stdout_json(&path, &["--imports-only"]);
    let children = body[0]["children"].as_array().expect("children array");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["label"], "\"fmt\"");
}

#[test]
fn imports_only_tolerates_an_unfinished_edit() {
    let temp = tempdir().unwrap();
    let src = "package demo\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc f( {\n";
    let path = write_go(temp.path(), "editing.go", src);

    // a half-typed signature fails a full outline
    outline_cmd().arg("-f").arg(&path).assert().failure();

    let body = stdout_json(&path, &["--imports-only"]);
    let children = body[0]["children"].as_array().expect("children array");
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["label"], "\"fmt\"");
    assert_eq!(children[1]["label"], "\"os\"");
}

#[test]
fn modified_outlines_the_overlay_not_the_disk() {
    let temp = tempdir().unwrap();
    let path = write_go(
        temp.path(),
        "main.go",
        "package disk\n\nfunc OnDisk() {}\n",
    );
    let key = path.to_str().unwrap();
    let archive = archive_for(&[(key, "package mem\n\nfunc InMemory() {}\n")]);

    let output = outline_cmd()
        .arg("-f")
        .arg(&path)
        .arg("--modified")
        .write_stdin(archive)
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body[0]["label"], "mem");
    assert_eq!(body[0]["children"][0]["label"], "InMemory");
}

#[test]
fn modified_requires_the_file_in_the_archive() {
    let temp = tempdir().unwrap();
    let path = write_go(temp.path(), "main.go", "package disk\n");
    let archive = archive_for(&[("some/other.go", "package other\n")]);

    outline_cmd()
        .arg("-f")
        .arg(&path)
        .arg("--modified")
        .write_stdin(archive)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("in archive"));
}

#[test]
fn malformed_archive_is_rejected() {
    let temp = tempdir().unwrap();
    let path = write_go(temp.path(), "main.go", "package disk\n");

    outline_cmd()
        .arg("-f")
        .arg(&path)
        .arg("--modified")
        .write_stdin("main.go\nnot-a-number\npackage x\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("archive"));
}

#[test]
fn modified_archive_with_multiple_entries_picks_the_right_one() {
    let temp = tempdir().unwrap();
    let path = write_go(temp.path(), "b.go", "package disk\n");
    let key = path.to_str().unwrap();
    let archive = archive_for(&[
        ("a.go", "package a\n\nvar A = 1\n"),
        (key, "package b\n\nvar B = 2\n"),
        ("c.go", "package c\n"),
    ]);

    let output = outline_cmd()
        .arg("-f")
        .arg(&path)
        .arg("--modified")
        .write_stdin(archive)
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body[0]["label"], "b");
    assert_eq!(body[0]["children"][0]["label"], "B");
}
