use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

const LISTING: &str = "\
        --------------------------- JOB INFORMATION ---------------------------
        N -- SCHD RESOLUTION REQUIRED      Y -- LOAD STEP TO BE EXECUTED
        . CLASS=,MSGCLASS=B,REGION=040K
        ------------------------- AGENT INFORMATION  -------------------------
        Job Type: NT_JOB
        Agent   : USER023ESP
        Userid  : usero23
";

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ljob-extract"))
}

fn write_listing(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("listing.txt");
    fs::write(&path, LISTING).expect("failed to write listing");
    path
}

#[test]
fn test_parse_file_json_lists_attributes() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_listing(&dir);

    let out = bin()
        .args(["parse-file", "--format", "json"])
        .arg(&path)
        .output()
        .expect("failed to run ljob-extract");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let entries: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("stdout should be JSON");
    let tokens: Vec<&str> = entries
        .as_array()
        .expect("JSON output is an entry list")
        .iter()
        .filter_map(|entry| entry["token"].as_str())
        .collect();
    assert!(tokens.contains(&"MSGCLASS"));
    assert!(tokens.contains(&"Agent"));
    assert!(tokens.contains(&"SCHD RESOLUTION REQUIRED"));
}

#[test]
fn test_parse_stdin_table_output() {
    let mut child = bin()
        .args(["parse-stdin", "--format", "table"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run ljob-extract");
    child
        .stdin
        .as_mut()
        .expect("stdin should be piped")
        .write_all(LISTING.as_bytes())
        .expect("failed to write stdin");
    let out = child.wait_with_output().expect("failed to wait for ljob-extract");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("job information:"));
    assert!(stdout.contains("MSGCLASS"));
    assert!(stdout.contains("USER023ESP"));
}

#[test]
fn test_get_resolves_and_reports_absent() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_listing(&dir);

    let out = bin()
        .arg("get")
        .arg(&path)
        .arg("msgclass")
        .output()
        .expect("failed to run ljob-extract");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "B");

    let out = bin()
        .arg("get")
        .arg(&path)
        .arg("owner")
        .output()
        .expect("failed to run ljob-extract");
    assert_eq!(out.status.code(), Some(2));

    // Scoped lookup: the token exists, but not in the requested section.
    let out = bin()
        .arg("get")
        .arg(&path)
        .arg("msgclass")
        .args(["--section", "header"])
        .output()
        .expect("failed to run ljob-extract");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_missing_file_fails_cleanly() {
    let out = bin()
        .args(["parse-file", "/nonexistent/ljob-listing.txt"])
        .output()
        .expect("failed to run ljob-extract");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read"));
}

#[test]
fn test_empty_stdin_is_a_parse_error() {
    let mut child = bin()
        .arg("parse-stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run ljob-extract");
    drop(child.stdin.take());
    let out = child.wait_with_output().expect("failed to wait for ljob-extract");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("listing text is empty"));
}

#[test]
fn test_report_flag_prints_coverage() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_listing(&dir);

    let out = bin()
        .args(["parse-file", "--report", "--format", "json"])
        .arg(&path)
        .output()
        .expect("failed to run ljob-extract");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"coverage\""));
    assert!(stdout.contains("\"generated_at\""));
}
