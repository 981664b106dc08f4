#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and responds to
//! the offline commands without crashing. Every test points
//! `XDG_CONFIG_HOME` at an empty temp dir so a user config cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn autotrans(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("autotrans").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("DEEPL_AUTH_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translate copied paper text"))
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("--interval-ms"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_sentences_from_stdin() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .arg("sentences")
        .write_stdin("This is the first sen-\ntence. It continues here\nand ends. Final one.")
        .assert()
        .success()
        .stdout(
            "This is the first sentence.\nIt continues here and ends.\nFinal one.\n",
        );
}

#[test]
fn test_sentences_keep_abbreviations_together() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .arg("sentences")
        .write_stdin("See Fig. 2 and Smith et al. for details. Done.")
        .assert()
        .success()
        .stdout("See Fig. 2 and Smith et al. for details.\nDone.\n");
}

#[test]
fn test_sentences_use_configured_abbreviations() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("autotrans");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        "[normalize]\nabbreviations = [\"Thm.\"]\n",
    )
    .unwrap();

    autotrans(&home)
        .arg("sentences")
        .write_stdin("See Thm. Two for that. Next.")
        .assert()
        .success()
        .stdout("See Thm. Two for that.\nNext.\n");
}

#[test]
fn test_sentences_verbose_reports_rules_version() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .args(["-v", "sentences"])
        .write_stdin("One. Two.")
        .assert()
        .success()
        .stdout("One.\nTwo.\n")
        .stderr(predicate::str::contains(format!(
            "2 sentence(s), rules v{}",
            autotrans::text::RULES_VERSION
        )));
}

#[test]
fn test_translate_with_noop_backend() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .args(["-q", "translate", "--backend", "noop"])
        .write_stdin("First one. Second one.")
        .assert()
        .success()
        .stdout("First one.\n\n\nSecond one.\n\n\n");
}

#[test]
fn test_translate_write_mode_appends_markdown() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("notes").join("out.md");

    autotrans(&home)
        .args(["-q", "translate", "-b", "noop", "-m", "write", "-o"])
        .arg(&out)
        .write_stdin("Only one.")
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&out).unwrap(), "Only one.\n\n> \n\n");
}

#[test]
fn test_translate_empty_input_fails() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .args(["translate", "--backend", "noop"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_invalid_config_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("autotrans");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[watch]\nbackend = \"babelfish\"\n").unwrap();

    autotrans(&home)
        .arg("backends")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_backends_list_without_config() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::contains("google (default)"))
        .stdout(predicate::str::contains("deepl"))
        .stdout(predicate::str::contains("not set"))
        .stdout(predicate::str::contains("noop"));
}

#[test]
fn test_backends_show_stored_credential() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("autotrans").join("credentials");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("deepl.key"), "secret-key:fx\n").unwrap();

    autotrans(&home)
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::contains("set (").and(predicate::str::contains("deepl.key")))
        .stdout(predicate::str::contains("secret-key").not());
}

#[test]
fn test_invalid_backend_is_rejected() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .args(["translate", "--backend", "babelfish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_translate_help() {
    let home = TempDir::new().unwrap();
    autotrans(&home)
        .args(["translate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("--output"));
}
