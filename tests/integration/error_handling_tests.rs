use super::fixture::{TestFixture, exists_at_all, is_symlink};
use crate::{assert_command_failure, assert_command_success};

#[test]
fn test_uninstall_unknown_workshop() {
    let fixture = TestFixture::new("test_uninstall_unknown_workshop");

    let output = fixture.run_wm(&["--json", "uninstall", "ghost"]);
    assert_command_failure!(output);
    assert_eq!(output.exit_code, 1);
    assert_eq!(output.error_code(), "WORKSHOP_NOT_INSTALLED");
    let json = output.json();
    assert_eq!(json["status"]["error"]["numeric_code"], 101);
    assert!(
        json["status"]["error"]["message"]
            .as_str()
            .unwrap()
            .contains("ghost")
    );
}

#[test]
fn test_install_twice_reports_already_installed() {
    let fixture = TestFixture::new("test_install_twice_reports_already_installed");
    let src = fixture.add_source("demo", "1.0.0");
    let src = src.to_str().unwrap();

    assert_command_success!(fixture.run_wm(&["install", src, "--version", "1.0.0"]));
    let again = fixture.run_wm(&["--json", "install", src, "--version", "1.0.0"]);
    assert_command_failure!(again);
    assert_eq!(again.error_code(), "WORKSHOP_ALREADY_INSTALLED");
}

#[test]
fn test_corrupt_ledger_is_not_overwritten() {
    let fixture = TestFixture::new("test_corrupt_ledger_is_not_overwritten");
    std::fs::create_dir_all(&fixture.root).unwrap();
    std::fs::write(fixture.ledger_path(), "{not json").unwrap();
    let src = fixture.add_source("demo", "1.0.0");

    let output = fixture.run_wm(&["--json", "install", src.to_str().unwrap()]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "LEDGER_CORRUPTED");
    assert_eq!(
        std::fs::read_to_string(fixture.ledger_path()).unwrap(),
        "{not json"
    );
    assert!(!exists_at_all(&fixture.local_bin("demo")));
}

#[test]
fn test_invalid_descriptor() {
    let fixture = TestFixture::new("test_invalid_descriptor");
    let dir = fixture.sources.join("broken");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("workshop.json"), r#"{"name": "broken"}"#).unwrap();

    let output = fixture.run_wm(&["--json", "install", dir.to_str().unwrap()]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "WORKSHOP_INVALID");
    assert!(!fixture.ledger_path().exists());
}

#[test]
fn test_unlink_conflict_requires_force() {
    let fixture = TestFixture::new("test_unlink_conflict_requires_force");
    let src = fixture.add_source("demo", "1.0.0");
    assert_command_success!(fixture.run_wm(&["install", src.to_str().unwrap()]));

    let system = fixture.system_link("demo");
    std::fs::remove_file(&system).unwrap();
    std::fs::write(&system, "someone else's binary").unwrap();

    let output = fixture.run_wm(&["--json", "unlink", "demo"]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "LINK_CONFLICT");
    assert_eq!(
        std::fs::read_to_string(&system).unwrap(),
        "someone else's binary"
    );

    let human = fixture.run_wm(&["unlink", "demo"]);
    assert_command_failure!(human);
    assert!(human.stderr.contains("File already exists at path"));
    assert!(human.stderr.contains("Hint:"));

    assert_command_success!(fixture.run_wm(&["unlink", "demo", "--force"]));
    assert!(!exists_at_all(&system));
}

#[test]
fn test_uninstall_conflict_keeps_ledger() {
    let fixture = TestFixture::new("test_uninstall_conflict_keeps_ledger");
    let src = fixture.add_source("demo", "1.0.0");
    assert_command_success!(fixture.run_wm(&["install", src.to_str().unwrap()]));

    let local = fixture.local_bin("demo");
    std::fs::remove_file(&local).unwrap();
    std::fs::write(&local, "user file").unwrap();

    let output = fixture.run_wm(&["--json", "uninstall", "demo"]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "LINK_CONFLICT");
    assert_eq!(fixture.ledger()["workshops"][0]["name"], "demo");
    assert!(fixture.store_binary("demo").exists());
}

#[test]
fn test_update_name_mismatch() {
    let fixture = TestFixture::new("test_update_name_mismatch");
    let demo = fixture.add_source("demo", "1.0.0");
    let other = fixture.add_source("other", "2.0.0");
    assert_command_success!(fixture.run_wm(&["install", demo.to_str().unwrap()]));

    let output = fixture.run_wm(&[
        "--json",
        "update",
        "demo",
        other.to_str().unwrap(),
        "--version",
        "2.0.0",
    ]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "WORKSHOP_INVALID");
    assert_eq!(fixture.ledger()["workshops"][0]["version"], "local");
}

#[test]
fn test_invalid_config_file() {
    let fixture = TestFixture::new("test_invalid_config_file");
    std::fs::write(&fixture.config_path, "this is not valid toml [[[").unwrap();

    let output = fixture.run_wm(&["--json", "list"]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "CONFIG_INVALID");
}

#[test]
fn test_path_like_ledger_record_is_rejected() {
    let fixture = TestFixture::new("test_path_like_ledger_record_is_rejected");
    std::fs::create_dir_all(&fixture.root).unwrap();
    let precious = fixture.temp_dir.path().join("precious.txt");
    std::fs::write(&precious, "keep").unwrap();
    let ledger = serde_json::json!({
        "workshops": [{
            "name": "..",
            "display_name": "parent",
            "owner": "o",
            "repo": "r",
            "description": "",
            "version": "1.0.0"
        }]
    });
    std::fs::write(fixture.ledger_path(), ledger.to_string()).unwrap();

    let output = fixture.run_wm(&["--json", "uninstall", "..", "--force"]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "LEDGER_CORRUPTED");
    assert_eq!(std::fs::read_to_string(&precious).unwrap(), "keep");
    assert!(fixture.system_bin.is_dir());
    assert!(fixture.ledger_path().is_file());
}

#[test]
fn test_link_failure_after_record_points_to_link() {
    let fixture = TestFixture::new("test_link_failure_after_record_points_to_link");
    let src = fixture.add_source("demo", "1.0.0");
    let src = src.to_str().unwrap();
    std::fs::create_dir_all(&fixture.root).unwrap();
    std::fs::write(fixture.root.join("bin"), "not a directory").unwrap();

    let output = fixture.run_wm(&["--json", "install", src]);
    assert_command_failure!(output);
    assert_eq!(output.error_code(), "LINK_FAILED");
    let error = &output.json()["status"]["error"];
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("installed but not linked")
    );
    assert!(
        error["suggestion"]
            .as_str()
            .unwrap()
            .contains("workshop-manager link demo")
    );
    assert_eq!(error["context"]["installed"], true);
    assert_eq!(fixture.ledger()["workshops"][0]["name"], "demo");

    let human = fixture.run_wm(&["link", "demo"]);
    assert_command_failure!(human);
    assert!(human.stderr.contains("Error:"));

    std::fs::remove_file(fixture.root.join("bin")).unwrap();
    assert_command_success!(fixture.run_wm(&["link", "demo"]));
    assert!(is_symlink(&fixture.local_bin("demo")));
}
