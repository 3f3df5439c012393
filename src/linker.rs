//! Executable linker.
//!
//! Exposes each installed workshop as a symlink in the local bin directory
//! and, when that directory is not on the search path, in the system bin
//! directory too. Every removal goes through [`clear_target`] so the
//! conflict/force rule is identical at all three sites.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, WmError};
use crate::events::{Event, EventSink, LinkScope};
use crate::ledger::Ledger;
use crate::paths::{PathResolver, SearchPath, search_path_contains};
use crate::utils::fs::is_dir_writable;
use crate::workshop::{Workshop, validate_name};

/// Permission bits applied to linked executables.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Result of clearing a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Nothing existed at the path.
    Absent,
    /// An entry existed and was removed.
    Removed,
    /// A non-link entry exists and force was not given; it was left alone.
    Conflict(PathBuf),
}

/// Clear `path` so a link can be created there.
///
/// Absent path: nothing to do. Symlink (dangling or not): removed. Anything
/// else is only removed when `force` is set, otherwise reported as a conflict.
pub fn clear_target(path: &Path, force: bool) -> Result<Removal> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Removal::Absent),
        Err(err) => return Err(WmError::from_io(path, &err)),
    };

    let file_type = meta.file_type();
    if !file_type.is_symlink() && !force {
        return Ok(Removal::Conflict(path.to_path_buf()));
    }

    let removed = if file_type.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removed.map_err(|err| WmError::from_io(path, &err))?;
    Ok(Removal::Removed)
}

/// What happened at the system bin location during `symlink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SystemLink {
    /// The local bin directory is on the search path.
    NotRequired,
    Linked { path: PathBuf },
    SkippedUnwritable { dir: PathBuf },
    SkippedConflict { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

/// Result of [`Linker::symlink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The local link is in place. System linking may have been skipped.
    Linked { local: PathBuf, system: SystemLink },
    /// A non-link file blocks the local target; nothing was changed.
    Conflict { path: PathBuf },
}

impl LinkOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Linked { .. })
    }
}

/// State of one link location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Missing,
    /// A symlink resolving to the workshop's store binary.
    Linked,
    /// A symlink pointing somewhere else.
    Foreign,
    /// A regular file or directory.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStatus {
    pub local: LinkState,
    pub system: LinkState,
    pub on_search_path: bool,
}

/// Creates and removes workshop links.
pub struct Linker<P, S> {
    paths: PathResolver,
    search_path: P,
    sink: S,
}

impl<P: SearchPath, S: EventSink> Linker<P, S> {
    pub const fn new(paths: PathResolver, search_path: P, sink: S) -> Self {
        Self {
            paths,
            search_path,
            sink,
        }
    }

    #[must_use]
    pub const fn paths(&self) -> &PathResolver {
        &self.paths
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether the local bin directory is on the search path right now.
    #[must_use]
    pub fn local_bin_on_search_path(&self) -> bool {
        let value = self.search_path.search_path();
        search_path_contains(value.as_ref(), &self.paths.local_bin_dir())
    }

    /// Expose `workshop` as an executable link.
    ///
    /// Fails with [`WmError::InvalidWorkshop`] or [`WmError::NotInstalled`]
    /// before touching the filesystem if the name is not a single path
    /// component or the ledger has no record of it. A conflicting file at the
    /// local target yields [`LinkOutcome::Conflict`]. Problems at the system
    /// target are reported as advisories and never fail the call.
    pub fn symlink(
        &self,
        ledger: &Ledger,
        workshop: &Workshop,
        force: bool,
    ) -> Result<LinkOutcome> {
        let name = workshop.name.as_str();
        validate_name(name)?;
        if !ledger.has_workshop(name) {
            return Err(WmError::NotInstalled(name.to_string()));
        }

        self.paths.ensure_local_bin_dir()?;
        let local = self.paths.local_bin(name);

        if let Removal::Conflict(path) = self.clear(name, LinkScope::Local, &local, force)? {
            warn!(workshop = name, path = %path.display(), "local link target is occupied");
            self.sink.emit(Event::Conflict {
                workshop: name.to_string(),
                scope: LinkScope::Local,
                path: path.clone(),
            });
            return Ok(LinkOutcome::Conflict { path });
        }

        self.link(name, LinkScope::Local, &local)?;

        let system = if self.local_bin_on_search_path() {
            debug!(workshop = name, "local bin dir on search path; system link not required");
            SystemLink::NotRequired
        } else {
            self.symlink_to_system(name, force)
        };

        Ok(LinkOutcome::Linked { local, system })
    }

    fn symlink_to_system(&self, name: &str, force: bool) -> SystemLink {
        let dir = self.paths.system_bin_dir().to_path_buf();
        if !is_dir_writable(&dir) {
            warn!(
                workshop = name,
                dir = %dir.display(),
                "system bin dir not writable; skipping system link"
            );
            self.sink.emit(Event::SystemUnwritable {
                workshop: name.to_string(),
                system_dir: dir.clone(),
                local_bin_dir: self.paths.local_bin_dir(),
                store_binary: self.paths.store_binary(name),
            });
            return SystemLink::SkippedUnwritable { dir };
        }

        let target = self.paths.system_bin(name);
        let attempt = self
            .clear(name, LinkScope::System, &target, force)
            .and_then(|removal| match removal {
                Removal::Conflict(path) => Ok(Some(path)),
                Removal::Absent | Removal::Removed => {
                    self.link(name, LinkScope::System, &target).map(|()| None)
                }
            });

        match attempt {
            Ok(None) => SystemLink::Linked { path: target },
            Ok(Some(path)) => {
                warn!(workshop = name, path = %path.display(), "system link target is occupied");
                self.sink.emit(Event::Conflict {
                    workshop: name.to_string(),
                    scope: LinkScope::System,
                    path: path.clone(),
                });
                SystemLink::SkippedConflict { path }
            }
            Err(err) => {
                warn!(workshop = name, error = %err, "system link failed");
                self.sink.emit(Event::SystemLinkFailed {
                    workshop: name.to_string(),
                    path: target.clone(),
                    reason: err.to_string(),
                });
                SystemLink::Failed {
                    path: target,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Remove the system and local links of `workshop`.
    ///
    /// Missing links are fine. A non-link file at either location without
    /// `force` fails with [`WmError::ConflictExisting`].
    pub fn unlink(&self, ledger: &Ledger, workshop: &Workshop, force: bool) -> Result<()> {
        let name = workshop.name.as_str();
        validate_name(name)?;
        if !ledger.has_workshop(name) {
            return Err(WmError::NotInstalled(name.to_string()));
        }

        let targets = [
            (LinkScope::System, self.paths.system_bin(name)),
            (LinkScope::Local, self.paths.local_bin(name)),
        ];
        for (scope, path) in targets {
            if let Removal::Conflict(path) = self.clear(name, scope, &path, force)? {
                self.sink.emit(Event::Conflict {
                    workshop: name.to_string(),
                    scope,
                    path: path.clone(),
                });
                return Err(WmError::ConflictExisting(path));
            }
        }

        info!(workshop = name, "links removed");
        Ok(())
    }

    /// Inspect both link locations without changing anything.
    #[must_use]
    pub fn link_status(&self, workshop: &Workshop) -> LinkStatus {
        let target = self.paths.store_binary(&workshop.name);
        LinkStatus {
            local: link_state(&self.paths.local_bin(&workshop.name), &target),
            system: link_state(&self.paths.system_bin(&workshop.name), &target),
            on_search_path: self.local_bin_on_search_path(),
        }
    }

    fn clear(&self, name: &str, scope: LinkScope, path: &Path, force: bool) -> Result<Removal> {
        let removal = clear_target(path, force)?;
        if removal == Removal::Removed {
            debug!(workshop = name, path = %path.display(), "removed existing entry");
            self.sink.emit(Event::Removed {
                workshop: name.to_string(),
                scope,
                path: path.to_path_buf(),
            });
        }
        Ok(removal)
    }

    fn link(&self, name: &str, scope: LinkScope, link: &Path) -> Result<()> {
        let target = self.paths.store_binary(name);
        create_symlink(&target, link).map_err(|err| WmError::from_io(link, &err))?;
        if let Err(err) = make_executable(link) {
            if let Err(cleanup) = std::fs::remove_file(link) {
                warn!(link = %link.display(), error = %cleanup, "could not remove partial link");
            }
            return Err(WmError::from_io(link, &err));
        }

        info!(workshop = name, link = %link.display(), target = %target.display(), "linked");
        self.sink.emit(Event::Linked {
            workshop: name.to_string(),
            scope,
            link: link.to_path_buf(),
            target,
        });
        Ok(())
    }
}

fn link_state(link: &Path, target: &Path) -> LinkState {
    match std::fs::symlink_metadata(link) {
        Err(_) => LinkState::Missing,
        Ok(meta) if !meta.file_type().is_symlink() => LinkState::Blocked,
        Ok(_) => match std::fs::read_link(link) {
            Ok(points_to) if points_to == target => LinkState::Linked,
            _ => LinkState::Foreign,
        },
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Set [`EXECUTABLE_MODE`] on the file `link` resolves to.
#[cfg(unix)]
fn make_executable(link: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(link, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
}

#[cfg(windows)]
fn make_executable(link: &Path) -> std::io::Result<()> {
    std::fs::metadata(link).map(|_| ())
}
