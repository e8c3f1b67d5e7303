//! Application layer errors.
//!
//! These errors represent failures in orchestration (reading files, loading
//! form documents), not validation outcomes. A value that breaks a rule is
//! reported inside a `ValidationResult` and never shows up here.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A file could not be inspected (missing, unreadable, not a file).
    #[error("Cannot inspect {path}: {reason}")]
    FileInspection { path: PathBuf, reason: String },

    /// A form document could not be read or parsed.
    #[error("Cannot load form {path}: {reason}")]
    FormLoad { path: PathBuf, reason: String },

    /// The form document format is not recognised.
    #[error("Unsupported form format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Shared state lock was poisoned.
    #[error("In-memory file store lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileInspection { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file exists and is readable".into(),
            ],
            Self::FormLoad { path, reason } => vec![
                format!("Could not parse {}: {}", path.display(), reason),
                "A form document maps field names to values at the top level".into(),
            ],
            Self::UnsupportedFormat { path } => vec![
                format!("'{}' is neither .json nor .toml", path.display()),
                "Rename the file with a .json or .toml extension".into(),
            ],
            Self::LockPoisoned => vec!["Try again; a previous operation panicked".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileInspection { .. } => ErrorCategory::NotFound,
            Self::FormLoad { .. } | Self::UnsupportedFormat { .. } => ErrorCategory::Validation,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
