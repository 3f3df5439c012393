use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn wm() -> Command {
    let mut cmd = Command::cargo_bin("workshop-manager").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("WM_FORCE");
    cmd
}

#[test]
fn test_cli_help() {
    wm().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"));
}

#[test]
fn test_cli_version() {
    wm().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    wm().arg("frobnicate").assert().failure();
}

#[test]
fn test_paths_reports_configured_locations() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    let system = dir.path().join("sys");
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[link]\nforce = true\n").unwrap();

    let output = wm()
        .env("WM_INSTALL_ROOT", &root)
        .env("WM_SYSTEM_BIN_DIR", &system)
        .env("PATH", "/usr/bin:/bin")
        .args(["--json", "--config"])
        .arg(&config)
        .arg("paths")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["install_root"], root.to_str().unwrap());
    assert_eq!(
        json["data"]["ledger"],
        root.join("installed.json").to_str().unwrap()
    );
    assert_eq!(json["data"]["system_bin_dir"], system.to_str().unwrap());
    assert_eq!(json["data"]["local_bin_on_path"], false);
    assert_eq!(json["data"]["force"], true);
    assert_eq!(json["data"]["config_file"], config.to_str().unwrap());
}

#[test]
fn test_paths_detects_local_bin_on_path() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    let path = format!("/usr/bin:{}/:/bin", root.join("bin").display());

    let output = wm()
        .env("WM_INSTALL_ROOT", &root)
        .env("HOME", dir.path())
        .env("PATH", path)
        .env_remove("WM_CONFIG")
        .args(["--json", "paths"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["local_bin_on_path"], true);
}

#[test]
fn test_list_empty_json() {
    let dir = tempdir().unwrap();
    wm().env("WM_INSTALL_ROOT", dir.path())
        .env("HOME", dir.path())
        .env_remove("WM_CONFIG")
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\": []"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempdir().unwrap();
    wm().env("WM_INSTALL_ROOT", dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
