//! Collaborators that supply releases and place workshop content on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, WmError};
use crate::paths::PathResolver;
use crate::utils::fs::copy_tree;
use crate::workshop::{Release, Workshop, validate_name};

/// Descriptor file expected at the root of a workshop source directory.
pub const DESCRIPTOR_FILE: &str = "workshop.json";

/// Remote release discovery.
///
/// Implementations fail with [`WmError::NetworkRequired`] when the remote
/// cannot be reached and [`WmError::NoReleases`] when it has no tags.
pub trait ReleaseSource {
    fn latest_release(&self, workshop: &Workshop) -> Result<Release>;
}

/// Places workshop files under `workshops/<id>/` in the store.
///
/// After `materialize` succeeds the store binary must exist at
/// [`PathResolver::store_binary`].
pub trait Materializer {
    fn materialize(&self, workshop: &Workshop, release: &Release, paths: &PathResolver)
    -> Result<()>;

    fn remove(&self, workshop: &Workshop, paths: &PathResolver) -> Result<()>;
}

/// Materializes from a local directory named by `Release::sha`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryMaterializer;

impl Materializer for DirectoryMaterializer {
    fn materialize(
        &self,
        workshop: &Workshop,
        release: &Release,
        paths: &PathResolver,
    ) -> Result<()> {
        let source = Path::new(&release.sha);
        if !source.is_dir() {
            return Err(WmError::Filesystem {
                path: source.to_path_buf(),
                reason: "workshop source is not a directory".to_string(),
            });
        }

        let store = paths.store_dir(&workshop.name);
        self.remove(workshop, paths)?;
        copy_tree(source, &store)?;

        info!(
            workshop = %workshop.name,
            version = %release.tag,
            store = %store.display(),
            "workshop files placed"
        );
        Ok(())
    }

    fn remove(&self, workshop: &Workshop, paths: &PathResolver) -> Result<()> {
        validate_name(&workshop.name)?;
        let store = paths.store_dir(&workshop.name);
        match std::fs::remove_dir_all(&store) {
            Ok(()) => {
                debug!(store = %store.display(), "workshop files removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(WmError::from_io(&store, &err)),
        }
    }
}

/// Serves one fixed release for every workshop.
#[derive(Debug, Clone)]
pub struct StaticReleaseSource {
    release: Release,
}

impl StaticReleaseSource {
    #[must_use]
    pub const fn new(release: Release) -> Self {
        Self { release }
    }
}

impl ReleaseSource for StaticReleaseSource {
    fn latest_release(&self, _workshop: &Workshop) -> Result<Release> {
        Ok(self.release.clone())
    }
}

/// Read `workshop.json` from a workshop source directory.
pub fn read_descriptor(dir: &Path) -> Result<Workshop> {
    let path: PathBuf = dir.join(DESCRIPTOR_FILE);
    let raw = std::fs::read_to_string(&path).map_err(|err| {
        WmError::InvalidWorkshop(format!("read {}: {err}", path.display()))
    })?;
    let workshop: Workshop = serde_json::from_str(&raw).map_err(|err| {
        WmError::InvalidWorkshop(format!("parse {}: {err}", path.display()))
    })?;
    workshop.validate()?;
    Ok(workshop)
}
