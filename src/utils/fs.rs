//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, WmError};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Whether the current process can create files in `dir`.
///
/// Checks by creating (and dropping) a temp file, which respects ACLs,
/// read-only mounts and the effective uid.
#[must_use]
pub fn is_dir_writable(dir: &Path) -> bool {
    dir.is_dir()
        && tempfile::Builder::new()
            .prefix(".wm-write-check")
            .tempfile_in(dir)
            .is_ok()
}

/// Recursively copy `src` into `dst`, preserving symlinks on unix.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|err| WmError::Filesystem {
            path: src.to_path_buf(),
            reason: err.to_string(),
        })?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| WmError::Filesystem {
                path: entry.path().to_path_buf(),
                reason: err.to_string(),
            })?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| WmError::from_io(&target, &e))?;
            continue;
        }

        #[cfg(unix)]
        if file_type.is_symlink() {
            let link = std::fs::read_link(entry.path())
                .map_err(|e| WmError::from_io(entry.path(), &e))?;
            std::os::unix::fs::symlink(&link, &target)
                .map_err(|e| WmError::from_io(&target, &e))?;
            continue;
        }

        std::fs::copy(entry.path(), &target).map_err(|e| WmError::from_io(&target, &e))?;
    }
    Ok(())
}
