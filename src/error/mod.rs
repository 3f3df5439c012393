//! Error handling for workshop-manager.
//!
//! This module provides:
//! - [`WmError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context

mod codes;
mod suggestions;

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::{suggest_for_error, suggest_relink};

/// Main error type for workshop-manager operations.
#[derive(Error, Debug)]
pub enum WmError {
    #[error("Workshop \"{0}\" not installed")]
    NotInstalled(String),

    #[error("Workshop not found: {0}")]
    NotFound(String),

    #[error("Workshop \"{name}\" is already installed at version {version}")]
    AlreadyInstalled { name: String, version: String },

    #[error("Invalid workshop: {0}")]
    InvalidWorkshop(String),

    #[error("Ledger at {} is corrupt: {reason}", .path.display())]
    StorageCorrupt { path: PathBuf, reason: String },

    #[error("File already exists at path \"{}\"", .0.display())]
    ConflictExisting(PathBuf),

    #[error("Permission denied at \"{}\": {reason}", .path.display())]
    PermissionDenied { path: PathBuf, reason: String },

    #[error("Filesystem operation failed at \"{}\": {reason}", .path.display())]
    Filesystem { path: PathBuf, reason: String },

    /// Recorded in the ledger, but creating its links failed.
    #[error("Workshop \"{name}\" is installed but not linked: {source}")]
    NotLinked { name: String, source: Box<WmError> },

    #[error("Network access required: {0}")]
    NetworkRequired(String),

    #[error("No tagged releases: {0}")]
    NoReleases(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WmError {
    /// Classify an I/O failure at `path` as permission or filesystem error.
    #[must_use]
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        } else {
            Self::Filesystem {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }

    /// Get the error code for this error.
    ///
    /// [`WmError::NotLinked`] reports the code of the failure it wraps.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotLinked { source, .. } => source.code(),
            Self::NotInstalled(_) => ErrorCode::WorkshopNotInstalled,
            Self::NotFound(_) => ErrorCode::WorkshopNotFound,
            Self::AlreadyInstalled { .. } => ErrorCode::WorkshopAlreadyInstalled,
            Self::InvalidWorkshop(_) => ErrorCode::WorkshopInvalid,
            Self::StorageCorrupt { .. } => ErrorCode::LedgerCorrupted,
            Self::ConflictExisting(_) => ErrorCode::LinkConflict,
            Self::PermissionDenied { .. } => ErrorCode::LinkPermissionDenied,
            Self::Filesystem { .. } => ErrorCode::LinkFailed,
            Self::NetworkRequired(_) => ErrorCode::NetworkRequired,
            Self::NoReleases(_) => ErrorCode::NoReleases,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::NotInstalled(name) | Self::NotFound(name) => {
                Some(serde_json::json!({ "workshop": name }))
            }
            Self::AlreadyInstalled { name, version } => {
                Some(serde_json::json!({ "workshop": name, "version": version }))
            }
            Self::ConflictExisting(path) => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            Self::StorageCorrupt { path, reason }
            | Self::PermissionDenied { path, reason }
            | Self::Filesystem { path, reason } => Some(serde_json::json!({
                "path": path.display().to_string(),
                "reason": reason,
            })),
            Self::NotLinked { name, source } => {
                let mut context = source.context().unwrap_or_else(|| serde_json::json!({}));
                if let Some(map) = context.as_object_mut() {
                    map.insert("workshop".to_string(), Value::from(name.as_str()));
                    map.insert("installed".to_string(), Value::Bool(true));
                }
                Some(context)
            }
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_wm_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "LINK_CONFLICT")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 401)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "link", "ledger")
    pub category: String,
}

impl StructuredError {
    /// Create a structured error from a [`WmError`].
    #[must_use]
    pub fn from_wm_error(err: &WmError) -> Self {
        let code = err.code();
        let context = err.context();
        let mut suggestion = suggest_for_error(code, context.as_ref());
        if let WmError::NotLinked { name, .. } = err {
            suggestion = suggest_relink(name, &suggestion);
        }

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&WmError> for StructuredError {
    fn from(err: &WmError) -> Self {
        Self::from_wm_error(err)
    }
}

/// Result type alias using WmError.
pub type Result<T> = std::result::Result<T, WmError>;
