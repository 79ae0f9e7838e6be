//! CLI tests for the `resume-parse` binary.
//!
//! Every test builds a DOCX fixture in a temp directory, so none of them
//! need libpdfium or tesseract.

// Allow deprecated cargo_bin usage until assert_cmd updates API
#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use common::jane_docx;
use predicates::prelude::*;
use tempfile::TempDir;

fn resume_parse() -> Command {
    let mut cmd = Command::cargo_bin("resume-parse").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    resume_parse()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn human_output_has_meta_and_text() {
    let dir = TempDir::new().unwrap();
    let path = jane_docx(dir.path(), "jane.docx");

    resume_parse()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[META] filetype=docx source="))
        .stdout(predicate::str::contains("jane.docx"))
        .stdout(predicate::str::contains("\n[TEXT]\n# Jane Doe\n"));
}

#[test]
fn plain_skips_markdown() {
    let dir = TempDir::new().unwrap();
    let path = jane_docx(dir.path(), "jane.docx");

    resume_parse()
        .arg("--plain")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[TEXT]\nJane Doe\n"))
        .stdout(predicate::str::contains("## Experience").not());
}

#[test]
fn json_output_is_the_full_record() {
    let dir = TempDir::new().unwrap();
    let path = jane_docx(dir.path(), "jane.docx");

    let out = resume_parse()
        .arg("--json")
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["metadata"]["filetype"], "docx");
    assert_eq!(v["structured"]["candidate"]["full_name"], "Jane Doe");
    assert_eq!(v["structured"]["sections"]["skills"]["hard"][1], "SQL");
}

#[test]
fn output_flag_writes_json_file() {
    let dir = TempDir::new().unwrap();
    let path = jane_docx(dir.path(), "jane.docx");
    let out = dir.path().join("out/jane.json");

    resume_parse()
        .arg(&path)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["structured"]["meta"]["file_name"], "jane.docx");
}

#[test]
fn detect_only_prints_type() {
    let dir = TempDir::new().unwrap();
    let path = jane_docx(dir.path(), "upload");

    resume_parse()
        .arg("--detect-only")
        .arg(&path)
        .assert()
        .success()
        .stdout("docx\n");
}

#[test]
fn missing_file_fails() {
    resume_parse()
        .arg("/definitely/not/here.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unsupported_type_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("setup.exe");
    std::fs::write(&path, b"MZ\x90\x00").unwrap();

    resume_parse()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}
