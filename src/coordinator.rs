//! Install coordinator.
//!
//! Orders the ledger, store and linker steps of each lifecycle command. The
//! ledger is persisted before linking, so a workshop whose link step fails is
//! still recorded, reported as [`WmError::NotLinked`], and can be repaired
//! with [`Coordinator::relink`].

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, WmError};
use crate::events::{Event, EventSink};
use crate::ledger::Ledger;
use crate::linker::{LinkOutcome, Linker};
use crate::paths::{PathResolver, SearchPath};
use crate::source::Materializer;
use crate::workshop::{InstalledWorkshop, Release, Workshop};

/// Result of a successful `install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub installed: InstalledWorkshop,
    pub link: LinkOutcome,
}

/// Result of a successful `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The release tag matches the installed version; nothing changed.
    UpToDate { version: String },
    Updated {
        from: String,
        to: String,
        link: LinkOutcome,
    },
}

/// Summary row used by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledSummary {
    pub name: String,
    pub display_name: String,
    pub version: String,
}

pub struct Coordinator<P, S> {
    ledger: Ledger,
    linker: Linker<P, S>,
    materializer: Box<dyn Materializer>,
}

impl<P: SearchPath, S: EventSink> Coordinator<P, S> {
    pub fn new(ledger: Ledger, linker: Linker<P, S>, materializer: Box<dyn Materializer>) -> Self {
        Self {
            ledger,
            linker,
            materializer,
        }
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub const fn linker(&self) -> &Linker<P, S> {
        &self.linker
    }

    #[must_use]
    pub const fn paths(&self) -> &PathResolver {
        self.linker.paths()
    }

    /// Place, record and link a workshop that is not installed yet.
    pub fn install(
        &mut self,
        workshop: &Workshop,
        release: &Release,
        force: bool,
    ) -> Result<InstallOutcome> {
        workshop.validate()?;
        if let Ok(existing) = self.ledger.get_by_name(&workshop.name) {
            return Err(WmError::AlreadyInstalled {
                name: existing.name.clone(),
                version: existing.version.clone(),
            });
        }

        self.place(workshop, release)?;

        let installed = InstalledWorkshop::from_workshop(workshop, release.tag.as_str());
        self.ledger.add(installed.clone());
        self.ledger.save()?;
        info!(workshop = %workshop.name, version = %release.tag, "workshop recorded");
        self.linker.sink().emit(Event::Installed {
            workshop: workshop.name.clone(),
            version: release.tag.clone(),
        });

        let link = self
            .linker
            .symlink(&self.ledger, workshop, force)
            .map_err(|err| not_linked(&workshop.name, err))?;
        if !link.is_success() {
            warn!(workshop = %workshop.name, "installed but not linked");
        }
        Ok(InstallOutcome { installed, link })
    }

    /// Unlink, forget and delete an installed workshop.
    ///
    /// A link conflict aborts before the ledger is touched.
    pub fn uninstall(&mut self, name: &str, force: bool) -> Result<InstalledWorkshop> {
        let workshop = self.installed_workshop(name)?;

        self.linker.unlink(&self.ledger, &workshop, force)?;
        let removed = self.ledger.remove(name)?;
        self.ledger.save()?;
        self.materializer.remove(&workshop, self.linker.paths())?;

        info!(workshop = name, version = %removed.version, "workshop uninstalled");
        self.linker.sink().emit(Event::Uninstalled {
            workshop: removed.name.clone(),
            version: removed.version.clone(),
        });
        Ok(removed)
    }

    /// Move an installed workshop to `release`.
    pub fn update(&mut self, name: &str, release: &Release, force: bool) -> Result<UpdateOutcome> {
        let current = self.ledger.get_by_name(name).map_err(|_| not_installed(name))?;
        if current.version == release.tag {
            info!(workshop = name, version = %release.tag, "already up to date");
            return Ok(UpdateOutcome::UpToDate {
                version: current.version.clone(),
            });
        }
        let from = current.version.clone();
        let workshop = current.as_workshop();

        self.linker.unlink(&self.ledger, &workshop, force)?;
        self.materializer.remove(&workshop, self.linker.paths())?;
        self.place(&workshop, release)?;

        self.ledger
            .add(InstalledWorkshop::from_workshop(&workshop, release.tag.as_str()));
        self.ledger.save()?;
        info!(workshop = name, from = %from, to = %release.tag, "workshop updated");
        self.linker.sink().emit(Event::Updated {
            workshop: name.to_string(),
            from: from.clone(),
            to: release.tag.clone(),
        });

        let link = self
            .linker
            .symlink(&self.ledger, &workshop, force)
            .map_err(|err| not_linked(name, err))?;
        Ok(UpdateOutcome::Updated {
            from,
            to: release.tag.clone(),
            link,
        })
    }

    /// Recreate the links of an installed workshop.
    pub fn relink(&self, name: &str, force: bool) -> Result<LinkOutcome> {
        let workshop = self.installed_workshop(name)?;
        self.linker.symlink(&self.ledger, &workshop, force)
    }

    /// Remove the links of an installed workshop, keeping it recorded.
    pub fn unlink(&self, name: &str, force: bool) -> Result<()> {
        let workshop = self.installed_workshop(name)?;
        self.linker.unlink(&self.ledger, &workshop, force)
    }

    #[must_use]
    pub fn list(&self) -> Vec<InstalledSummary> {
        let mut rows: Vec<InstalledSummary> = self
            .ledger
            .get_all()
            .iter()
            .map(|w| InstalledSummary {
                name: w.name.clone(),
                display_name: w.display_name.clone(),
                version: w.version.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    fn installed_workshop(&self, name: &str) -> Result<Workshop> {
        self.ledger
            .get_by_name(name)
            .map(InstalledWorkshop::as_workshop)
            .map_err(|_| not_installed(name))
    }

    fn place(&self, workshop: &Workshop, release: &Release) -> Result<()> {
        let paths = self.linker.paths();
        self.materializer.materialize(workshop, release, paths)?;

        let binary = paths.store_binary(&workshop.name);
        if !binary.is_file() {
            return Err(WmError::Filesystem {
                path: binary,
                reason: "workshop binary missing after materialize".to_string(),
            });
        }
        Ok(())
    }
}

fn not_installed(name: &str) -> WmError {
    WmError::NotInstalled(name.to_string())
}

fn not_linked(name: &str, err: WmError) -> WmError {
    warn!(workshop = name, error = %err, "recorded but linking failed");
    WmError::NotLinked {
        name: name.to_string(),
        source: Box::new(err),
    }
}
