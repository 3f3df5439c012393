//! Path layout for installed workshops.
//!
//! ```text
//! <install-root>/
//!     installed.json            ledger
//!     bin/<id>                  local link
//!     workshops/<id>/bin/<id>   store binary
//! <system-bin>/<id>             system-wide link
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, WmError};
use crate::utils::fs::ensure_dir;

/// Default privileged directory for system-wide links.
pub const DEFAULT_SYSTEM_BIN_DIR: &str = "/usr/local/bin";

/// Ledger file name under the install root.
pub const LEDGER_FILE: &str = "installed.json";

/// Computes canonical locations for a workshop identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    install_root: PathBuf,
    system_bin_dir: PathBuf,
}

impl PathResolver {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self::with_system_bin_dir(install_root, DEFAULT_SYSTEM_BIN_DIR)
    }

    pub fn with_system_bin_dir(
        install_root: impl Into<PathBuf>,
        system_bin_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            install_root: install_root.into(),
            system_bin_dir: system_bin_dir.into(),
        }
    }

    #[must_use]
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    #[must_use]
    pub fn system_bin_dir(&self) -> &Path {
        &self.system_bin_dir
    }

    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.install_root.join(LEDGER_FILE)
    }

    /// `<root>/workshops/<id>`
    #[must_use]
    pub fn store_dir(&self, id: &str) -> PathBuf {
        self.install_root.join("workshops").join(id)
    }

    /// `<root>/workshops/<id>/bin/<id>`, the executable a link points at.
    #[must_use]
    pub fn store_binary(&self, id: &str) -> PathBuf {
        self.store_dir(id).join("bin").join(id)
    }

    #[must_use]
    pub fn local_bin_dir(&self) -> PathBuf {
        self.install_root.join("bin")
    }

    #[must_use]
    pub fn local_bin(&self, id: &str) -> PathBuf {
        self.local_bin_dir().join(id)
    }

    #[must_use]
    pub fn system_bin(&self, id: &str) -> PathBuf {
        self.system_bin_dir.join(id)
    }

    /// Create `<root>/bin` if it does not exist yet.
    pub fn ensure_local_bin_dir(&self) -> Result<PathBuf> {
        let dir = self.local_bin_dir();
        ensure_dir(&dir).map_err(|err| match err {
            WmError::Io(io) => WmError::from_io(&dir, &io),
            other => other,
        })?;
        Ok(dir)
    }
}

/// Source of the host's executable search path.
///
/// Read on every call so a changed `PATH` is seen immediately.
pub trait SearchPath {
    fn search_path(&self) -> Option<OsString>;
}

/// Reads `PATH` from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSearchPath;

impl SearchPath for EnvSearchPath {
    fn search_path(&self) -> Option<OsString> {
        std::env::var_os("PATH")
    }
}

/// A fixed search path, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedSearchPath(pub OsString);

impl FixedSearchPath {
    pub fn new(value: impl Into<OsString>) -> Self {
        Self(value.into())
    }
}

impl SearchPath for FixedSearchPath {
    fn search_path(&self) -> Option<OsString> {
        Some(self.0.clone())
    }
}

/// Whether `dir` is one of the entries of the search-path variable.
///
/// Entries are compared component-wise, so `/a/bin/` matches `/a/bin` but
/// `/a/bin2` does not.
#[must_use]
pub fn search_path_contains(search_path: Option<&OsString>, dir: &Path) -> bool {
    let Some(value) = search_path else {
        return false;
    };
    std::env::split_paths(value)
        .filter(|entry| !entry.as_os_str().is_empty())
        .any(|entry| entry.components().eq(dir.components()))
}
