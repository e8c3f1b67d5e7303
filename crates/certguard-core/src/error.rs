//! Crate-level error type.
//!
//! Wraps the domain and application errors so callers of the services deal
//! with one type. Rule violations are not errors: they travel as data in a
//! [`ValidationResult`](crate::domain::ValidationResult).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CertguardError {
    /// Bad rule configuration or an unknown catalog name.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// File inspection or form loading failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CertguardError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
        }
    }
}

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied something malformed.
    Validation,
    /// A named entry, file or document does not exist.
    NotFound,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::NotFound => Self::NotFound,
        }
    }
}

pub type CertguardResult<T> = Result<T, CertguardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn unknown_entry_is_not_found() {
        let err: CertguardError = DomainError::UnknownCatalogEntry("ssn".into()).into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.to_string(), "Unknown validator 'ssn'");
    }

    #[test]
    fn application_suggestions_pass_through() {
        let err: CertguardError = ApplicationError::UnsupportedFormat {
            path: PathBuf::from("form.yaml"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains(".json")));
    }

    #[test]
    fn poisoned_store_is_internal() {
        let err = CertguardError::from(ApplicationError::LockPoisoned);
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
