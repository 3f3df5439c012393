use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Assert command succeeded
#[macro_export]
macro_rules! assert_command_success {
    ($output:expr) => {
        assert!(
            $output.success,
            "Command failed with exit code {}\nstdout: {}\nstderr: {}",
            $output.exit_code, $output.stdout, $output.stderr
        );
    };
}

/// Assert command failed
#[macro_export]
macro_rules! assert_command_failure {
    ($output:expr) => {
        assert!(
            !$output.success,
            "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
            $output.stdout, $output.stderr
        );
    };
}

/// Search path used when the local bin dir must not be on `PATH`.
const BASE_PATH: &str = "/usr/bin:/bin";

/// Isolated install root, system bin dir and workshop sources.
pub struct TestFixture {
    pub temp_dir: TempDir,
    /// Install root (`WM_INSTALL_ROOT`)
    pub root: PathBuf,
    /// System bin dir (`WM_SYSTEM_BIN_DIR`)
    pub system_bin: PathBuf,
    /// Config file passed via `WM_CONFIG`
    pub config_path: PathBuf,
    /// Directory holding workshop source trees
    pub sources: PathBuf,
    /// Put `<root>/bin` on `PATH` for spawned commands
    pub local_on_path: bool,
    test_name: String,
}

impl TestFixture {
    pub fn new(test_name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let root = base.join("wm-root");
        let system_bin = base.join("system-bin");
        let config_path = base.join("config.toml");
        let sources = base.join("sources");

        std::fs::create_dir_all(&system_bin).expect("Failed to create system bin");
        std::fs::create_dir_all(&sources).expect("Failed to create sources dir");
        std::fs::write(&config_path, "").expect("Failed to write config");

        println!("\n{}", "=".repeat(70));
        println!("[FIXTURE] Test: {test_name}");
        println!("[FIXTURE] Root: {}", root.display());
        println!("[FIXTURE] System bin: {}", system_bin.display());
        println!("{}", "=".repeat(70));

        Self {
            temp_dir,
            root,
            system_bin,
            config_path,
            sources,
            local_on_path: false,
            test_name: test_name.to_string(),
        }
    }

    /// Fixture whose `PATH` already contains the local bin dir.
    pub fn with_local_on_path(test_name: &str) -> Self {
        let mut fixture = Self::new(test_name);
        fixture.local_on_path = true;
        fixture
    }

    /// Write a workshop source tree and return its directory.
    pub fn add_source(&self, name: &str, version: &str) -> PathBuf {
        let dir = self.sources.join(format!("{name}-{version}"));
        std::fs::create_dir_all(dir.join("bin")).expect("Failed to create source bin");
        let descriptor = serde_json::json!({
            "name": name,
            "display_name": format!("{name} workshop"),
            "owner": "workshops",
            "repo": name,
            "description": format!("Learn {name}"),
        });
        std::fs::write(
            dir.join("workshop.json"),
            serde_json::to_string_pretty(&descriptor).unwrap(),
        )
        .expect("Failed to write descriptor");
        std::fs::write(
            dir.join("bin").join(name),
            format!("#!/bin/sh\necho {name} {version}\n"),
        )
        .expect("Failed to write binary");
        dir
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join("installed.json")
    }

    pub fn local_bin(&self, name: &str) -> PathBuf {
        self.root.join("bin").join(name)
    }

    pub fn system_link(&self, name: &str) -> PathBuf {
        self.system_bin.join(name)
    }

    pub fn store_binary(&self, name: &str) -> PathBuf {
        self.root.join("workshops").join(name).join("bin").join(name)
    }

    pub fn ledger(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.ledger_path()).expect("ledger should exist");
        serde_json::from_str(&raw).expect("ledger should be valid JSON")
    }

    pub fn search_path(&self) -> String {
        if self.local_on_path {
            format!("{}:{BASE_PATH}", self.root.join("bin").display())
        } else {
            BASE_PATH.to_string()
        }
    }

    pub fn run_wm(&self, args: &[&str]) -> CommandOutput {
        self.run_wm_with_env(args, &[])
    }

    pub fn run_wm_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> CommandOutput {
        println!("\n[CMD] {} workshop-manager {}", self.test_name, args.join(" "));

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_workshop-manager"));
        cmd.args(args)
            .env("HOME", self.temp_dir.path())
            .env("PATH", self.search_path())
            .env("WM_INSTALL_ROOT", &self.root)
            .env("WM_SYSTEM_BIN_DIR", &self.system_bin)
            .env("WM_CONFIG", &self.config_path)
            .env_remove("WM_FORCE")
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute workshop-manager");
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        println!("[CMD] Exit code: {}", output.status.code().unwrap_or(-1));
        if !stdout.is_empty() {
            println!("[STDOUT]\n{stdout}");
        }
        if !stderr.is_empty() {
            println!("[STDERR]\n{stderr}");
        }

        CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout,
            stderr,
        }
    }
}

/// Command output structure
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should be valid JSON")
    }

    /// Error code from a `--json` error response
    pub fn error_code(&self) -> String {
        self.json()["status"]["error"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

pub fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

pub fn exists_at_all(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
