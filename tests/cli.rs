//! Integration tests for the `eggsml` command-line interface.
//!
//! These cover reading from standard input and files, the output modes,
//! colour control and error reporting.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

mod prelude;
use prelude::*;

fn eggsml() -> Command {
    let mut cmd = Command::cargo_bin("eggsml").expect("failed to create cargo command for eggsml");
    cmd.env_remove("EGGSML_WIDTH");
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).expect("failed to create temporary file");
    f.write_all(content.as_bytes()).expect("failed to write file");
    f.flush().expect("failed to flush file");
    path
}

#[test]
fn test_cli_version_flag() {
    eggsml()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("eggsml {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_wraps_stdin() {
    eggsml()
        .args(["--width", "11", "--color", "never"])
        .write_stdin("*alpha* beta gamma\n")
        .assert()
        .success()
        .stdout("alpha beta\ngamma\n");
}

#[test]
fn test_cli_width_from_environment() {
    eggsml()
        .env("EGGSML_WIDTH", "5")
        .arg("--color=never")
        .write_stdin("one two")
        .assert()
        .success()
        .stdout("one\ntwo\n");
}

#[test]
fn test_cli_hanging_indent() {
    eggsml()
        .args(["--width", "9", "--hanging-indent", "2", "--color", "never"])
        .write_stdin("aaaa bbbb cccc")
        .assert()
        .success()
        .stdout("aaaa bbbb\n  cccc\n");
}

#[rstest]
#[case::plain_text("--plain-text", "*bold* [x]\n", "bold x\n")]
#[case::markup("--markup", "\"*q*\" *a*`*b*\n", "**q** *a*`*b*\n")]
fn test_cli_output_modes(#[case] flag: &str, #[case] input: &str, #[case] expected: &str) {
    eggsml()
        .arg(flag)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected.to_owned());
}

#[test]
fn test_cli_output_modes_conflict() {
    eggsml()
        .args(["--plain-text", "--markup"])
        .write_stdin("x")
        .assert()
        .failure();
}

#[test]
fn test_cli_color_always_emits_escapes() {
    eggsml()
        .args(["--color", "always"])
        .write_stdin("_red_")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[31mred"));
}

#[test]
fn test_cli_rejects_zero_width() {
    eggsml().args(["--width", "0"]).write_stdin("x").assert().failure();
}

#[test]
fn test_cli_reports_parse_errors() {
    eggsml()
        .write_stdin("*unterminated")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not closed"));
}

#[test]
fn test_cli_processes_files_in_order() {
    let dir = tempdir().expect("failed to create temporary directory");
    let mut files = Vec::new();
    let mut expected = String::new();
    for i in 0..4 {
        files.push(write_file(dir.path(), &format!("doc{i}.eggs"), &format!("*doc* {i}\n")));
        expected.push_str(&format!("doc {i}\n"));
    }
    eggsml()
        .arg("--color=never")
        .args(&files)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = tempdir().expect("failed to create temporary directory");
    let good = write_file(dir.path(), "good.eggs", "fine\n");
    let missing = dir.path().join("missing.eggs");
    eggsml()
        .arg(&good)
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_cli_names_file_with_bad_markup() {
    let dir = tempdir().expect("failed to create temporary directory");
    let bad = write_file(dir.path(), "bad.eggs", "a]\n");
    eggsml()
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.eggs:1: Unexpected ']'"));
}

#[test]
fn test_cli_locates_markup_error_in_stdin() {
    eggsml()
        .write_stdin("ok\na]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<stdin>:4: Unexpected ']'"));
}
