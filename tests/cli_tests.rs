//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn confstack() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("confstack"))
}

#[test]
fn test_cli_version() {
    let mut cmd = confstack();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("confstack"));
}

#[test]
fn test_cli_help() {
    let mut cmd = confstack();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Load, merge and inspect"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_merge_layers_two_files() {
    let tmp = TempDir::new().expect("temp dir");
    let base = tmp.path().join("base.json");
    let overlay = tmp.path().join("overlay.yaml");
    fs::write(&base, r#"{"runserver": {"port": 1111}}"#).expect("write base");
    fs::write(&overlay, "runserver:\n  nested_list: [1, 2]\n").expect("write overlay");

    let mut cmd = confstack();
    cmd.args(["merge", base.to_str().expect("utf8"), overlay.to_str().expect("utf8")]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""port":1111"#))
        .stdout(predicate::str::contains(r#""nested_list":[1,2]"#));
}

#[test]
fn test_merge_pretty_output() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("config.ini");
    fs::write(&cfg, "foobar = \"johndoe\"\n").expect("write config");

    let mut cmd = confstack();
    cmd.args(["merge", "--pretty", cfg.to_str().expect("utf8")]);
    cmd.assert().success().stdout(predicate::str::contains("\"foobar\": \"johndoe\""));
}

#[test]
fn test_merge_rejects_invalid_policy() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "port = 1\n").expect("write config");

    let mut cmd = confstack();
    cmd.args(["merge", "--policy", "discard", cfg.to_str().expect("utf8")]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid error-handling policy"));
}

#[test]
fn test_merge_rejects_invalid_format() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "port = 1\n").expect("write config");

    let mut cmd = confstack();
    cmd.args(["merge", "--format", "xml", cfg.to_str().expect("utf8")]);
    cmd.assert().failure().stderr(predicate::str::contains("invalid config format"));
}

#[test]
fn test_merge_ignore_policy_skips_missing_first_source() {
    let tmp = TempDir::new().expect("temp dir");
    let missing = tmp.path().join("missing.json");
    let present = tmp.path().join("present.toml");
    fs::write(&present, "[runserver]\nuser = \"someone\"\n").expect("write present");

    let mut cmd = confstack();
    cmd.args([
        "merge",
        "--policy",
        "ignore",
        missing.to_str().expect("utf8"),
        present.to_str().expect("utf8"),
    ]);
    cmd.assert().success().stdout(predicate::str::contains(r#"{"runserver":{"user":"someone"}}"#));
}

#[test]
fn test_merge_abort_policy_prints_context_and_fails() {
    let tmp = TempDir::new().expect("temp dir");
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{\"main\": \"started\",\n \"runserver\" = {}}").expect("write bad");

    let mut cmd = confstack();
    cmd.args(["merge", bad.to_str().expect("utf8")]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Context:"))
        .stderr(predicate::str::contains("Abort!"));
}

#[test]
fn test_merge_propagate_policy_reports_parse_location() {
    let tmp = TempDir::new().expect("temp dir");
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{\"main\": \"started\",\n \"runserver\" = {}}").expect("write bad");

    let mut cmd = confstack();
    cmd.args(["merge", "--policy", "propagate", bad.to_str().expect("utf8")]);
    cmd.assert().failure().stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_check_reports_ok_per_file() {
    let tmp = TempDir::new().expect("temp dir");
    let yaml = tmp.path().join("cfg.yaml");
    fs::write(&yaml, "runserver:\n  port: 3333\n").expect("write yaml");

    let mut cmd = confstack();
    cmd.args(["check", yaml.to_str().expect("utf8")]);
    cmd.assert().success().stdout(predicate::str::contains("ok (yaml"));
}

#[test]
fn test_check_exits_nonzero_on_parse_failure() {
    let tmp = TempDir::new().expect("temp dir");
    let good = tmp.path().join("good.toml");
    let bad = tmp.path().join("bad.toml");
    fs::write(&good, "port = 1\n").expect("write good");
    fs::write(&bad, "port =\n").expect("write bad");

    let mut cmd = confstack();
    cmd.args(["check", good.to_str().expect("utf8"), bad.to_str().expect("utf8")]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("ok (toml"))
        .stdout(predicate::str::contains("bad.toml"))
        .stderr(predicate::str::contains("1 of 2 config sources failed"));
}

#[test]
fn test_check_missing_file_is_an_error() {
    let tmp = TempDir::new().expect("temp dir");
    let missing = tmp.path().join("missing.yaml");

    let mut cmd = confstack();
    cmd.args(["check", missing.to_str().expect("utf8")]);
    cmd.assert().failure().stdout(predicate::str::contains("not found"));
}
