// ============================================================================
// domain/error.rs - CONFIGURATION-TIME DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Rule violations are never errors: they are reported as data inside a
/// `ValidationResult`. This enum only covers mistakes made while *building*
/// rules or looking up catalog entries.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown validator '{0}'")]
    UnknownCatalogEntry(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPattern { pattern, .. } => vec![
                format!("The expression '{}' does not compile", pattern),
                "Patterns use Rust `regex` syntax (no look-around or back-references)".into(),
            ],
            Self::UnknownCatalogEntry(name) => vec![
                format!("No validator is registered under '{}'", name),
                "Try: certguard catalog".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPattern { .. } => ErrorCategory::Validation,
            Self::UnknownCatalogEntry(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
