//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Workshop errors
//! - 2xx: Ledger errors
//! - 3xx: Config errors
//! - 4xx: Link errors
//! - 5xx: Release/network errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for `--json` output.
///
/// Each variant maps to a numeric code (e.g., `WorkshopNotInstalled` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Workshop errors (1xx)
    // ========================================
    /// E101: Operation requires a workshop that is not installed
    WorkshopNotInstalled,
    /// E102: Ledger lookup for an unknown identifier
    WorkshopNotFound,
    /// E103: Workshop is already installed
    WorkshopAlreadyInstalled,
    /// E104: Workshop descriptor is malformed
    WorkshopInvalid,

    // ========================================
    // Ledger errors (2xx)
    // ========================================
    /// E201: Ledger file cannot be parsed
    LedgerCorrupted,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Link errors (4xx)
    // ========================================
    /// E401: A non-link file blocks a link target
    LinkConflict,
    /// E402: Permission denied while changing a link target
    LinkPermissionDenied,
    /// E403: Link creation or removal failed unexpectedly
    LinkFailed,

    // ========================================
    // Release errors (5xx)
    // ========================================
    /// E501: Remote release source cannot be reached
    NetworkRequired,
    /// E502: Remote has no tagged releases
    NoReleases,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: IO operation failed
    IoError,
    /// E902: Serialization/deserialization failed
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `WorkshopNotInstalled` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::WorkshopNotInstalled => 101,
            Self::WorkshopNotFound => 102,
            Self::WorkshopAlreadyInstalled => 103,
            Self::WorkshopInvalid => 104,

            Self::LedgerCorrupted => 201,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::LinkConflict => 401,
            Self::LinkPermissionDenied => 402,
            Self::LinkFailed => 403,

            Self::NetworkRequired => 501,
            Self::NoReleases => 502,

            Self::IoError => 901,
            Self::SerializationError => 902,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::WorkshopNotInstalled => "Run `workshop-manager list` to see installed workshops, or install it first",
            Self::WorkshopNotFound => "Check the workshop name for typos. Run `workshop-manager list` to see installed workshops",
            Self::WorkshopAlreadyInstalled => "Use `workshop-manager update` to change the installed version",
            Self::WorkshopInvalid => "Check the workshop.json descriptor: name, display_name, owner, repo and description are required",

            Self::LedgerCorrupted => "The installed.json ledger is unreadable. Fix or remove it and reinstall your workshops",

            Self::ConfigInvalid => "Check TOML syntax in the config file",
            Self::ConfigMissingRequired => "Set the value in config.toml or through its WM_* environment variable",

            Self::LinkConflict => "Try again using --force or manually remove the file",
            Self::LinkPermissionDenied => "You may need to remove a blocking file manually with elevated privileges",
            Self::LinkFailed => "Check that the workshop files exist and the bin directory is writable",

            Self::NetworkRequired => "Check your internet connection and retry",
            Self::NoReleases => "This workshop has no tagged releases yet",

            Self::IoError => "File operation failed. Check path exists and permissions are correct",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::WorkshopNotInstalled
            | Self::WorkshopNotFound
            | Self::WorkshopAlreadyInstalled
            | Self::WorkshopInvalid
            | Self::LedgerCorrupted
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::LinkConflict
            | Self::LinkPermissionDenied
            | Self::NetworkRequired
            | Self::IoError => true,

            Self::LinkFailed | Self::NoReleases | Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "workshop",
            2 => "ledger",
            3 => "config",
            4 => "link",
            5 => "release",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::WorkshopNotInstalled,
            Self::WorkshopNotFound,
            Self::WorkshopAlreadyInstalled,
            Self::WorkshopInvalid,
            Self::LedgerCorrupted,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::LinkConflict,
            Self::LinkPermissionDenied,
            Self::LinkFailed,
            Self::NetworkRequired,
            Self::NoReleases,
            Self::IoError,
            Self::SerializationError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
