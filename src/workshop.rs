//! Workshop descriptors and installed records.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WmError};

/// Immutable descriptor of a workshop as published in its source repository.
///
/// Identity is the `name`: two descriptors with the same name are the same
/// installable unit, and the name is used as a path component on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub name: String,
    pub display_name: String,
    /// Source repository account.
    pub owner: String,
    /// Source repository name.
    pub repo: String,
    pub description: String,
}

impl Workshop {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            owner: owner.into(),
            repo: repo.into(),
            description: description.into(),
        }
    }

    /// Reject names that cannot be used as a single path component.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        validate_name(name)?;
        if self.owner.is_empty() || self.repo.is_empty() {
            return Err(WmError::InvalidWorkshop(format!(
                "workshop {name} is missing its owner or repo"
            )));
        }
        Ok(())
    }
}

/// Check that `name` is usable as one path component under the store and
/// bin directories.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(WmError::InvalidWorkshop("name must not be empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(WmError::InvalidWorkshop(format!(
            "name must be a single path component: {name}"
        )));
    }
    Ok(())
}

/// A workshop recorded in the ledger together with its installed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledWorkshop {
    pub name: String,
    pub display_name: String,
    pub owner: String,
    pub repo: String,
    pub description: String,
    pub version: String,
}

impl InstalledWorkshop {
    #[must_use]
    pub fn from_workshop(workshop: &Workshop, version: impl Into<String>) -> Self {
        Self {
            name: workshop.name.clone(),
            display_name: workshop.display_name.clone(),
            owner: workshop.owner.clone(),
            repo: workshop.repo.clone(),
            description: workshop.description.clone(),
            version: version.into(),
        }
    }

    #[must_use]
    pub fn as_workshop(&self) -> Workshop {
        Workshop {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            description: self.description.clone(),
        }
    }
}

/// A tagged release of a workshop.
///
/// `sha` is the content reference handed to the materializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag: String,
    pub sha: String,
}

impl Release {
    pub fn new(tag: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            sha: sha.into(),
        }
    }
}
