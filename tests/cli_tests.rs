//! Command line smoke tests. None of these reach the pipeline.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("ags_provision").unwrap();
    cmd.env_remove("AGS_VARIANT").env_remove("AGS_SKIP_CONFIRM");
    cmd
}

#[test]
fn help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--variant"))
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("AGS_SKIP_CONFIRM"))
        .stdout(predicate::str::contains("advanced"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ags_provision "));
}

#[test]
fn unknown_variant_is_a_usage_error() {
    cmd()
        .args(["--variant", "deluxe"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'deluxe'"));
}

#[test]
fn invalid_variant_from_environment_is_rejected() {
    cmd()
        .env("AGS_VARIANT", "everything")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn missing_config_file_fails_before_doing_anything() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--yes", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn falsey_skip_toggle_still_requires_a_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "install_root = \"/nonexistent/apps\"\n").unwrap();

    cmd()
        .env("AGS_SKIP_CONFIRM", "0")
        .arg("--config")
        .arg(&config)
        .write_stdin("y\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Installing AGS Editor"))
        .stderr(predicate::str::contains("not a terminal"));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "variant = \"bundle\"\ncolour = true\n").unwrap();

    cmd()
        .args(["--yes", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}
