use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("stile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sign-in"))
        .stdout(predicate::str::contains("sign-out"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("routes"));
}

#[test]
fn test_sign_in_help_shows_flags() {
    cargo_bin_cmd!("stile")
        .args(["sign-in", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--username"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--from"));
}

#[test]
fn test_routes_lists_access_levels() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("stile")
        .env("STILE_HOME", dir.path())
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/sign-in"))
        .stdout(predicate::str::contains("public"))
        .stdout(predicate::str::contains("/dashboard"))
        .stdout(predicate::str::contains("/charts/line-charts"))
        .stdout(predicate::str::contains("protected"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("stile")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_debug_logging_reaches_stderr() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("stile")
        .env("STILE_HOME", dir.path())
        .env("RUST_LOG", "debug")
        .arg("routes")
        .assert()
        .success()
        .stderr(predicate::str::contains("config loaded"));
}
