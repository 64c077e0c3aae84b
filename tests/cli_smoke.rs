#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the binary starts, reads a settings file and
//! rejects bad options without contacting any LLM.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SETTINGS: &str = r#"
[[llms]]
title = "GPT-4o mini"
model = "gpt-4o-mini"
api_key = "${LLM_TRANSLATE_SMOKE_KEY}"

[[llms]]
title = "Local"
model = "llama3.2"
api_base = "http://127.0.0.1:9/v1"

[[languages]]
title = "English"
language = "English"

[[languages]]
title = "日本語"
language = "Japanese"
"#;

#[allow(deprecated)]
fn llm_translate() -> Command {
    Command::cargo_bin("llm-translate").unwrap()
}

fn settings_file() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, SETTINGS).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
fn test_help_displays_usage() {
    llm_translate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translation"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--llm"))
        .stdout(predicate::str::contains("--settings"));
}

#[test]
fn test_version_displays_version() {
    llm_translate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["languages", "--settings", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"))
        .stdout(predicate::str::contains("Auto Detect"))
        .stdout(predicate::str::contains("Japanese"))
        .stdout(predicate::str::contains("日本語"));
}

#[test]
fn test_llms_list() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["llms", "--settings", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPT-4o mini"))
        .stdout(predicate::str::contains("llama3.2"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_invalid_language() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["--settings", &path, "--to", "Klingon"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_auto_target_rejected() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["--settings", &path, "--to", "auto"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used as a target language"));
}

#[test]
fn test_unknown_llm() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["--settings", &path, "--llm", "Nope"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LLM 'Nope' not found"));
}

#[test]
fn test_missing_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    llm_translate()
        .args(["languages", "--settings", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read settings file"));
}

#[test]
fn test_empty_input_rejected() {
    let (_dir, path) = settings_file();

    llm_translate()
        .args(["--settings", &path])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_chat_help() {
    llm_translate()
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--llm"));
}
