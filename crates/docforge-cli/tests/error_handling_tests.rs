//! Tests for exit codes, error rendering and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docforge(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("docforge").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("DOCFORGE_TEMPLATES");
    cmd
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("bundle"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path()).arg("explode").assert().code(5);
}

#[test]
fn test_invalid_collision_policy_is_usage_error() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args(["init", "--non-interactive", "--on-collision", "merge"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("overwrite"));
}

#[test]
fn test_malformed_rule_is_usage_error() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args(["validate", "--rule", "no-equals-sign"])
        .assert()
        .code(5);
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args(["list", "-c", "missing.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_missing_template_folder_outside_dry_run() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args([
            "init",
            "--non-interactive",
            "--no-cache",
            "--include",
            "does-not-exist",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!temp.path().join("docs/ai/INDEX.md").exists());
}

#[test]
fn test_missing_template_folder_in_dry_run_is_warning() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args([
            "init",
            "--non-interactive",
            "--no-cache",
            "--dry-run",
            "--include",
            "does-not-exist",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_missing_bundle_config_reports_path() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .arg("bundle")
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime.yaml"));
}

#[test]
fn test_verbose_hint_only_without_verbose() {
    let temp = TempDir::new().unwrap();
    docforge(temp.path())
        .args(["list", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose"));

    docforge(temp.path())
        .args(["-v", "list", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
