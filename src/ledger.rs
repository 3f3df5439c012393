//! Persisted install ledger (`installed.json`).
//!
//! The ledger is read entirely into memory on load and written entirely on
//! save. `add` and `remove` only touch the in-memory collection; callers must
//! call [`Ledger::save`] to persist them.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WmError};
use crate::workshop::{InstalledWorkshop, validate_name};

/// On-disk shape of the ledger file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    workshops: Vec<InstalledWorkshop>,
}

/// Durable record of installed workshops, keyed by name.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    workshops: Vec<InstalledWorkshop>,
}

impl Ledger {
    /// Load the ledger at `path`.
    ///
    /// A missing or blank file yields an empty ledger. Content that does not
    /// parse into the expected shape, or a record whose name is not a single
    /// path component, fails with [`WmError::StorageCorrupt`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(WmError::StorageCorrupt {
                    path,
                    reason: err.to_string(),
                });
            }
        };

        if raw.trim().is_empty() {
            debug!(path = %path.display(), "ledger absent or empty");
            return Ok(Self {
                path,
                workshops: Vec::new(),
            });
        }

        let file: LedgerFile =
            serde_json::from_str(&raw).map_err(|err| WmError::StorageCorrupt {
                path: path.clone(),
                reason: err.to_string(),
            })?;

        let mut ledger = Self {
            path,
            workshops: Vec::with_capacity(file.workshops.len()),
        };
        // Duplicate names in a hand-edited file collapse to the last record.
        for workshop in file.workshops {
            validate_name(&workshop.name).map_err(|err| WmError::StorageCorrupt {
                path: ledger.path.clone(),
                reason: err.to_string(),
            })?;
            ledger.add(workshop);
        }
        debug!(
            path = %ledger.path.display(),
            count = ledger.workshops.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an installed workshop by name.
    pub fn get_by_name(&self, name: &str) -> Result<&InstalledWorkshop> {
        self.workshops
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| WmError::NotFound(name.to_string()))
    }

    #[must_use]
    pub fn has_workshop(&self, name: &str) -> bool {
        self.workshops.iter().any(|w| w.name == name)
    }

    #[must_use]
    pub fn get_all(&self) -> &[InstalledWorkshop] {
        &self.workshops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workshops.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workshops.len()
    }

    /// Insert a record, replacing any record with the same name in place.
    pub fn add(&mut self, workshop: InstalledWorkshop) {
        match self.workshops.iter_mut().find(|w| w.name == workshop.name) {
            Some(existing) => *existing = workshop,
            None => self.workshops.push(workshop),
        }
    }

    /// Remove the record named `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Result<InstalledWorkshop> {
        let index = self
            .workshops
            .iter()
            .position(|w| w.name == name)
            .ok_or_else(|| WmError::NotFound(name.to_string()))?;
        Ok(self.workshops.remove(index))
    }

    /// Write the whole collection back to disk.
    ///
    /// Content goes to a sibling temp file which is synced and then renamed
    /// over the ledger, so a crash never leaves a truncated ledger behind.
    pub fn save(&self) -> Result<()> {
        let file = LedgerFile {
            workshops: self.workshops.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WmError::from_io(parent, &e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp =
            std::fs::File::create(&temp_path).map_err(|e| WmError::from_io(&temp_path, &e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.write_all(b"\n"))
            .and_then(|()| temp.sync_all())
            .map_err(|e| WmError::from_io(&temp_path, &e))?;
        drop(temp);

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            WmError::from_io(&self.path, &e)
        })?;

        debug!(
            path = %self.path.display(),
            count = self.workshops.len(),
            "ledger saved"
        );
        Ok(())
    }
}
