use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WmError};
use crate::paths::{DEFAULT_SYSTEM_BIN_DIR, PathResolver};

/// Directory name under the home directory used when no root is configured.
pub const DEFAULT_ROOT_DIR: &str = ".workshop-manager";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub link: LinkConfig,
}

impl Config {
    /// Defaults, then the explicit file (`--config` or `WM_CONFIG`) or the
    /// global file, then `WM_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("WM_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(WmError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Location of the global config file, if the platform has one.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("workshop-manager/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| WmError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| WmError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.link {
            self.link.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(env_string)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = non_empty(lookup("WM_INSTALL_ROOT")) {
            self.paths.install_root = Some(PathBuf::from(value));
        }
        if let Some(value) = non_empty(lookup("WM_SYSTEM_BIN_DIR")) {
            self.paths.system_bin_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("WM_FORCE") {
            self.link.force = parse_bool("WM_FORCE", &value)?;
        }
        Ok(())
    }

    /// Build the path resolver for this configuration.
    pub fn resolver(&self) -> Result<PathResolver> {
        Ok(PathResolver::with_system_bin_dir(
            self.paths.resolved_install_root()?,
            expand_home(&self.paths.system_bin_dir),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Store root; `~/.workshop-manager` when unset.
    #[serde(default)]
    pub install_root: Option<PathBuf>,
    #[serde(default = "default_system_bin_dir")]
    pub system_bin_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            install_root: None,
            system_bin_dir: default_system_bin_dir(),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.install_root {
            self.install_root = Some(value);
        }
        if let Some(value) = patch.system_bin_dir {
            self.system_bin_dir = value;
        }
    }

    pub fn resolved_install_root(&self) -> Result<PathBuf> {
        match &self.install_root {
            Some(root) => Ok(expand_home(root)),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_ROOT_DIR))
                .ok_or_else(|| {
                    WmError::MissingConfig(
                        "home directory not found; set paths.install_root or WM_INSTALL_ROOT"
                            .to_string(),
                    )
                }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Replace non-link files at link targets without asking for `--force`.
    #[serde(default)]
    pub force: bool,
}

impl LinkConfig {
    fn merge(&mut self, patch: LinkPatch) {
        if let Some(value) = patch.force {
            self.force = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub link: Option<LinkPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub install_root: Option<PathBuf>,
    pub system_bin_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LinkPatch {
    pub force: Option<bool>,
}

fn default_system_bin_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SYSTEM_BIN_DIR)
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(WmError::Config(format!("invalid {key} value {other}"))),
    }
}
